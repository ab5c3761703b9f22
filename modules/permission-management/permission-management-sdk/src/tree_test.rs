use super::*;
use crate::models::ProviderInfoDto;
use tracing_test::traced_test;

fn node(name: &str, parent: &str, granted: bool) -> PermissionGrantInfoDto {
    PermissionGrantInfoDto::node(name, parent, granted)
}

fn granted(nodes: &[PermissionGrantInfoDto], name: &str) -> bool {
    nodes
        .iter()
        .find(|n| n.name == name)
        .map(|n| n.is_granted)
        .unwrap()
}

/// A ← B ← C ← D, all granted.
fn chain() -> Vec<PermissionGrantInfoDto> {
    vec![
        node("A", "", true),
        node("B", "A", true),
        node("C", "B", true),
        node("D", "C", true),
    ]
}

// ========== depth ==========

#[test]
fn depth_is_twenty_per_ancestor() {
    let nodes = chain();
    assert_eq!(compute_depth(&nodes, &nodes[0]), 0);
    assert_eq!(compute_depth(&nodes, &nodes[1]), 20);
    assert_eq!(compute_depth(&nodes, &nodes[2]), 40);
    assert_eq!(compute_depth(&nodes, &nodes[3]), 60);
}

#[test]
fn depth_is_deterministic() {
    let nodes = chain();
    let first = compute_depths(&nodes);
    let second = compute_depths(&nodes);
    assert_eq!(first, second);
    assert_eq!(first, vec![0, 20, 40, 60]);
}

#[test]
fn parent_outside_the_list_counts_as_top_level() {
    let group = vec![node("Orders.Create", "Orders", false)];
    assert_eq!(compute_depth(&group, &group[0]), 0);
}

#[test]
fn depth_stops_at_a_missing_grandparent() {
    let group = vec![node("B", "A", false), node("C", "B", false)];
    assert_eq!(compute_depth(&group, &group[1]), 20);
}

#[test]
#[traced_test]
fn depth_survives_parent_cycles() {
    let nodes = vec![node("A", "B", false), node("B", "A", false)];
    assert_eq!(compute_depth(&nodes, &nodes[0]), 20);
    assert!(logs_contain("cycle in permission parent chain"));

    let self_parent = vec![node("A", "A", false)];
    assert_eq!(compute_depth(&self_parent, &self_parent[0]), 0);
}

// ========== toggle ==========

#[test]
fn revoke_cascades_to_children_and_keeps_parent() {
    let nodes = vec![node("A", "", true), node("B", "A", true), node("C", "B", true)];

    for mode in [CascadeMode::Direct, CascadeMode::Transitive] {
        let next = toggle_permission(&nodes, "B", mode);
        assert!(granted(&next, "A"), "{mode:?}");
        assert!(!granted(&next, "B"), "{mode:?}");
        assert!(!granted(&next, "C"), "{mode:?}");
    }
}

#[test]
fn grant_pulls_in_parent() {
    let nodes = vec![node("A", "", false), node("B", "A", false)];

    for mode in [CascadeMode::Direct, CascadeMode::Transitive] {
        let next = toggle_permission(&nodes, "B", mode);
        assert!(granted(&next, "A"), "{mode:?}");
        assert!(granted(&next, "B"), "{mode:?}");
    }
}

#[test]
fn direct_revoke_only_reaches_children() {
    let next = toggle_permission(&chain(), "B", CascadeMode::Direct);
    assert!(!granted(&next, "C"));
    assert!(granted(&next, "D"));
}

#[test]
fn transitive_revoke_reaches_whole_subtree() {
    let mut nodes = chain();
    nodes.push(node("C2", "B", true));
    nodes.push(node("X", "", true));

    let next = toggle_permission(&nodes, "B", CascadeMode::Transitive);
    for name in ["B", "C", "C2", "D"] {
        assert!(!granted(&next, name), "{name} should be revoked");
    }
    assert!(granted(&next, "A"));
    assert!(granted(&next, "X"));
}

#[test]
fn direct_grant_only_reaches_parent() {
    let nodes: Vec<_> = chain()
        .into_iter()
        .map(|n| PermissionGrantInfoDto {
            is_granted: false,
            ..n
        })
        .collect();

    let next = toggle_permission(&nodes, "D", CascadeMode::Direct);
    assert!(granted(&next, "D"));
    assert!(granted(&next, "C"));
    assert!(!granted(&next, "B"));
    assert!(!granted(&next, "A"));
}

#[test]
fn transitive_grant_reaches_every_ancestor() {
    let nodes: Vec<_> = chain()
        .into_iter()
        .map(|n| PermissionGrantInfoDto {
            is_granted: false,
            ..n
        })
        .collect();

    let next = toggle_permission(&nodes, "D", CascadeMode::Transitive);
    assert!(next.iter().all(|n| n.is_granted));
}

#[test]
fn toggle_leaves_input_untouched() {
    let nodes = chain();
    let _ = toggle_permission(&nodes, "A", CascadeMode::Transitive);
    assert!(nodes.iter().all(|n| n.is_granted));
}

#[test]
fn toggle_of_unknown_name_is_a_no_op() {
    let nodes = chain();
    assert_eq!(toggle_permission(&nodes, "Missing", CascadeMode::Transitive), nodes);
}

#[test]
fn transitive_cascade_terminates_on_cycles() {
    let nodes = vec![node("A", "B", false), node("B", "A", false)];
    let next = toggle_permission(&nodes, "A", CascadeMode::Transitive);
    assert!(next.iter().all(|n| n.is_granted));

    let next = toggle_permission(&next, "A", CascadeMode::Transitive);
    assert!(next.iter().all(|n| !n.is_granted));
}

#[test]
fn cascade_crosses_groups() {
    // The flat list may span groups; the parent lives elsewhere in the list.
    let nodes = vec![node("Reports.Export", "Reports", false), node("Reports", "", false)];
    let next = toggle_permission(&nodes, "Reports.Export", CascadeMode::Direct);
    assert!(granted(&next, "Reports"));
}

// ========== bulk ==========

#[test]
fn grant_state_tri_state() {
    assert_eq!(grant_state(&[]), GrantState::None);
    assert_eq!(grant_state(&[node("A", "", false)]), GrantState::None);
    assert_eq!(
        grant_state(&[node("A", "", true), node("B", "", false)]),
        GrantState::Partial
    );
    assert_eq!(grant_state(&chain()), GrantState::All);
}

#[test]
fn select_all_turns_everything_on_when_nothing_is_granted() {
    let nodes = vec![node("A", "", false), node("B", "A", false)];
    let next = select_all(&nodes);
    assert_eq!(grant_state(&next), GrantState::All);
}

#[test]
fn select_all_turns_everything_off_otherwise() {
    let partial = vec![node("A", "", true), node("B", "A", false)];
    assert_eq!(grant_state(&select_all(&partial)), GrantState::None);
    assert_eq!(grant_state(&select_all(&chain())), GrantState::None);
}

#[test]
fn select_all_twice_is_not_an_identity() {
    let partial = vec![node("A", "", true), node("B", "A", false)];
    let twice = select_all(&select_all(&partial));
    assert_eq!(grant_state(&twice), GrantState::All);
    assert_ne!(twice, partial);
}

#[test]
fn select_group_only_touches_members() {
    let nodes = vec![
        node("Users", "", false),
        node("Users.Create", "Users", false),
        node("Roles", "", true),
    ];

    let next = select_group(&nodes, &["Users", "Users.Create"]);
    assert!(granted(&next, "Users"));
    assert!(granted(&next, "Users.Create"));
    assert!(granted(&next, "Roles"));

    let next = select_group(&next, &["Users", "Users.Create"]);
    assert!(!granted(&next, "Users"));
    assert!(!granted(&next, "Users.Create"));
    assert!(granted(&next, "Roles"));
}

#[test]
fn select_group_bypasses_the_parent_invariant() {
    let nodes = vec![node("Users", "", false), node("Users.Create", "Users", false)];
    let next = select_group(&nodes, &["Users.Create"]);
    assert!(granted(&next, "Users.Create"));
    assert!(!granted(&next, "Users"));
}

// ========== diff ==========

#[test]
fn diff_of_identical_snapshots_is_empty() {
    let nodes = chain();
    assert!(diff(&nodes, &nodes).is_empty());
    assert!(diff(&[], &[]).is_empty());
}

#[test]
fn diff_is_minimal() {
    let original = vec![node("p1", "", true), node("p2", "", false)];
    let current = vec![node("p1", "", false), node("p2", "", false)];

    assert_eq!(
        diff(&original, &current),
        vec![UpdatePermissionDto {
            name: "p1".to_owned(),
            is_granted: false,
        }]
    );
}

#[test]
fn diff_ignores_order_and_unmatched_names() {
    let original = vec![node("p2", "", false), node("p1", "", true)];
    let current = vec![node("p1", "", false), node("p2", "", true), node("p3", "", true)];

    let changes = diff(&original, &current);
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().any(|c| c.name == "p1" && !c.is_granted));
    assert!(changes.iter().any(|c| c.name == "p2" && c.is_granted));
}

// ========== other providers ==========

#[test]
fn inherited_grants_are_detected() {
    let mut inherited = node("Users", "", true);
    inherited.granted_providers.push(ProviderInfoDto {
        provider_name: "R".to_owned(),
        provider_key: "admin".to_owned(),
    });

    assert!(is_granted_by_other_provider(&inherited, "U"));
    assert!(!is_granted_by_other_provider(&inherited, "R"));

    inherited.is_granted = false;
    assert!(!is_granted_by_other_provider(&inherited, "U"));
}
