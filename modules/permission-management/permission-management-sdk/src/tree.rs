//! Permission hierarchy reconciler.
//!
//! Nodes live in a flat list and point at their parent by name. Nothing here
//! materializes a tree: parents and children are resolved through a
//! name→index map built once per call.
//!
//! The invariant maintained by [`toggle_permission`]: a granted node has a
//! granted ancestor chain, and a revoked node has a revoked subtree. The bulk
//! operations ([`select_all`], [`select_group`]) deliberately bypass it.
//!
//! All functions are total. Parent cycles coming from the server are cut at
//! the first revisited node and reported with a warning.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::models::{PermissionGrantInfoDto, UpdatePermissionDto};

/// Indentation added per ancestor level.
pub const INDENT_STEP: u32 = 20;

/// How far a single toggle propagates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Revoke touches direct children only; grant touches the direct parent only.
    Direct,
    /// Revoke walks the whole subtree; grant walks the whole ancestor chain.
    #[default]
    Transitive,
}

/// Aggregate grant state of a set of nodes, as shown by a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantState {
    None,
    Partial,
    All,
}

fn index_by_name(nodes: &[PermissionGrantInfoDto]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(node.name.as_str()).or_insert(i);
    }
    index
}

fn depth_in(
    nodes: &[PermissionGrantInfoDto],
    index: &HashMap<&str, usize>,
    node: &PermissionGrantInfoDto,
) -> u32 {
    let mut depth = 0;
    let mut visited = HashSet::from([node.name.as_str()]);
    let mut parent_name = node.parent_name.as_str();

    while !parent_name.is_empty() {
        let Some(&parent_idx) = index.get(parent_name) else {
            break;
        };
        let parent = &nodes[parent_idx];
        if !visited.insert(parent.name.as_str()) {
            tracing::warn!(
                permission = %node.name,
                parent = %parent.name,
                "cycle in permission parent chain; indentation truncated"
            );
            break;
        }
        depth += INDENT_STEP;
        parent_name = parent.parent_name.as_str();
    }

    depth
}

/// Indentation of `node`: [`INDENT_STEP`] per ancestor found in `all_nodes`.
///
/// `all_nodes` is the node's group; a parent outside it counts as absent, so
/// the chain stops there. Top-level nodes have depth 0.
#[must_use]
pub fn compute_depth(all_nodes: &[PermissionGrantInfoDto], node: &PermissionGrantInfoDto) -> u32 {
    depth_in(all_nodes, &index_by_name(all_nodes), node)
}

/// Depth of every node of `nodes`, in order, sharing one name index.
#[must_use]
pub fn compute_depths(nodes: &[PermissionGrantInfoDto]) -> Vec<u32> {
    let index = index_by_name(nodes);
    nodes.iter().map(|node| depth_in(nodes, &index, node)).collect()
}

/// Flip the grant of the node named `clicked` and cascade.
///
/// - revoke: children (or, transitively, the whole subtree) are revoked;
/// - grant: the parent (or, transitively, every ancestor) is granted.
///
/// An unknown `clicked` leaves the list unchanged.
#[must_use]
pub fn toggle_permission(
    all_nodes: &[PermissionGrantInfoDto],
    clicked: &str,
    mode: CascadeMode,
) -> Vec<PermissionGrantInfoDto> {
    let mut nodes = all_nodes.to_vec();
    let index = index_by_name(all_nodes);
    let Some(&clicked_idx) = index.get(clicked) else {
        tracing::debug!(permission = %clicked, "toggle of unknown permission ignored");
        return nodes;
    };

    let was_granted = all_nodes[clicked_idx].is_granted;
    for node in nodes.iter_mut().filter(|n| n.name == clicked) {
        node.is_granted = !was_granted;
    }

    if was_granted {
        for idx in descendants(all_nodes, clicked, mode) {
            nodes[idx].is_granted = false;
        }
    } else {
        for idx in ancestors(all_nodes, &index, clicked_idx, mode) {
            nodes[idx].is_granted = true;
        }
    }

    nodes
}

fn descendants(nodes: &[PermissionGrantInfoDto], root: &str, mode: CascadeMode) -> Vec<usize> {
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, node) in nodes.iter().enumerate() {
        if !node.parent_name.is_empty() {
            children.entry(node.parent_name.as_str()).or_default().push(i);
        }
    }

    let mut found = Vec::new();
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(name) = queue.pop_front() {
        for &child in children.get(name).into_iter().flatten() {
            let child_name = nodes[child].name.as_str();
            found.push(child);
            if mode == CascadeMode::Transitive && visited.insert(child_name) {
                queue.push_back(child_name);
            }
        }
    }

    found
}

fn ancestors(
    nodes: &[PermissionGrantInfoDto],
    index: &HashMap<&str, usize>,
    start: usize,
    mode: CascadeMode,
) -> Vec<usize> {
    let mut found = Vec::new();
    let mut visited = HashSet::from([nodes[start].name.as_str()]);
    let mut parent_name = nodes[start].parent_name.as_str();

    while let Some(&parent_idx) = index.get(parent_name) {
        found.push(parent_idx);
        let parent = &nodes[parent_idx];
        if mode == CascadeMode::Direct || !visited.insert(parent.name.as_str()) {
            break;
        }
        parent_name = parent.parent_name.as_str();
    }

    found
}

/// Tri-state of `nodes`: none, some or all granted. An empty set is `None`.
#[must_use]
pub fn grant_state(nodes: &[PermissionGrantInfoDto]) -> GrantState {
    let granted = nodes.iter().filter(|n| n.is_granted).count();
    match granted {
        0 => GrantState::None,
        g if g == nodes.len() => GrantState::All,
        _ => GrantState::Partial,
    }
}

/// Bulk toggle of every node: nothing granted → grant all, otherwise revoke all.
///
/// No cascade is applied.
#[must_use]
pub fn select_all(nodes: &[PermissionGrantInfoDto]) -> Vec<PermissionGrantInfoDto> {
    let target = grant_state(nodes) == GrantState::None;
    nodes
        .iter()
        .map(|node| PermissionGrantInfoDto {
            is_granted: target,
            ..node.clone()
        })
        .collect()
}

/// Same rule as [`select_all`], restricted to the nodes named in `members`.
///
/// Nodes outside `members` are left alone, even when that leaves a granted
/// child under a revoked parent.
#[must_use]
pub fn select_group<S: AsRef<str>>(
    nodes: &[PermissionGrantInfoDto],
    members: &[S],
) -> Vec<PermissionGrantInfoDto> {
    let members: HashSet<&str> = members.iter().map(AsRef::as_ref).collect();
    let any_granted = nodes
        .iter()
        .any(|n| n.is_granted && members.contains(n.name.as_str()));

    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if members.contains(node.name.as_str()) {
                node.is_granted = !any_granted;
            }
            node
        })
        .collect()
}

/// Changed `{name, isGranted}` pairs between two snapshots, in `current` order.
///
/// Only names present in both snapshots are compared.
#[must_use]
pub fn diff(
    original: &[PermissionGrantInfoDto],
    current: &[PermissionGrantInfoDto],
) -> Vec<UpdatePermissionDto> {
    let before: HashMap<&str, bool> = original
        .iter()
        .map(|node| (node.name.as_str(), node.is_granted))
        .collect();

    current
        .iter()
        .filter(|node| {
            before
                .get(node.name.as_str())
                .is_some_and(|&was| was != node.is_granted)
        })
        .map(|node| UpdatePermissionDto {
            name: node.name.clone(),
            is_granted: node.is_granted,
        })
        .collect()
}

/// True when `node` is granted through a provider other than `provider_name`,
/// e.g. a user permission inherited from one of the user's roles. Such nodes
/// cannot be edited for this provider.
#[must_use]
pub fn is_granted_by_other_provider(node: &PermissionGrantInfoDto, provider_name: &str) -> bool {
    node.is_granted
        && node
            .granted_providers
            .iter()
            .any(|p| p.provider_name != provider_name)
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
