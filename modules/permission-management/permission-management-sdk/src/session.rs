//! Edit session over the permission set of one provider.
//!
//! A session is created from one wholesale fetch, mutated locally through the
//! reconciler in [`crate::tree`], and either dropped (cancel) or saved as the
//! diff against the fetched snapshot. Node membership is fixed for the
//! lifetime of the session.

use crate::error::PermissionManagementError;
use crate::models::{
    GetPermissionListResultDto, PermissionGrantInfoDto, ProviderRef, UpdatePermissionDto,
};
use crate::tree::{self, CascadeMode, GrantState};

/// A permission group: display data plus the names of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    pub name: String,
    pub display_name: String,
    pub members: Vec<String>,
}

/// What a UI renders for one permission of the selected group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRow {
    pub name: String,
    pub display_name: String,
    pub is_granted: bool,
    pub indent: u32,
    /// Granted through another provider; the checkbox is read-only.
    pub locked: bool,
}

#[derive(Debug, Clone)]
pub struct PermissionEditSession {
    provider: ProviderRef,
    entity_display_name: String,
    groups: Vec<PermissionGroup>,
    original: Vec<PermissionGrantInfoDto>,
    current: Vec<PermissionGrantInfoDto>,
    selected_group: Option<usize>,
    cascade: CascadeMode,
}

impl PermissionEditSession {
    /// Flatten a fetch result into a session; the first group is selected.
    #[must_use]
    pub fn new(
        provider: ProviderRef,
        result: GetPermissionListResultDto,
        cascade: CascadeMode,
    ) -> Self {
        let mut groups = Vec::with_capacity(result.groups.len());
        let mut nodes = Vec::new();

        for group in result.groups {
            groups.push(PermissionGroup {
                name: group.name,
                display_name: group.display_name,
                members: group.permissions.iter().map(|p| p.name.clone()).collect(),
            });
            nodes.extend(group.permissions);
        }

        let selected_group = if groups.is_empty() { None } else { Some(0) };

        Self {
            provider,
            entity_display_name: result.entity_display_name,
            groups,
            original: nodes.clone(),
            current: nodes,
            selected_group,
            cascade,
        }
    }

    #[must_use]
    pub fn provider(&self) -> &ProviderRef {
        &self.provider
    }

    #[must_use]
    pub fn entity_display_name(&self) -> &str {
        &self.entity_display_name
    }

    #[must_use]
    pub fn cascade(&self) -> CascadeMode {
        self.cascade
    }

    #[must_use]
    pub fn groups(&self) -> &[PermissionGroup] {
        &self.groups
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<&PermissionGroup> {
        self.selected_group.map(|i| &self.groups[i])
    }

    /// Switch the visible group.
    ///
    /// # Errors
    /// Returns `UnknownGroup` if no group has this name.
    pub fn select_group(&mut self, name: &str) -> Result<(), PermissionManagementError> {
        let idx = self.group_index(name)?;
        self.selected_group = Some(idx);
        Ok(())
    }

    /// Current state of every node, across all groups.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionGrantInfoDto] {
        &self.current
    }

    #[must_use]
    pub fn permission(&self, name: &str) -> Option<&PermissionGrantInfoDto> {
        self.current.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn is_locked(&self, node: &PermissionGrantInfoDto) -> bool {
        tree::is_granted_by_other_provider(node, &self.provider.provider_name)
    }

    /// Rows of the selected group, indented within that group.
    #[must_use]
    pub fn rows(&self) -> Vec<PermissionRow> {
        let Some(group) = self.selected_group() else {
            return Vec::new();
        };
        let nodes = self.members_of(group);
        let depths = tree::compute_depths(&nodes);

        nodes
            .iter()
            .zip(depths)
            .map(|(node, indent)| PermissionRow {
                name: node.name.clone(),
                display_name: node.display_name.clone(),
                is_granted: node.is_granted,
                indent,
                locked: self.is_locked(node),
            })
            .collect()
    }

    /// Toggle one checkbox, cascading per the session's [`CascadeMode`].
    ///
    /// Nodes granted by another provider are never changed by the cascade.
    ///
    /// # Errors
    /// Returns `UnknownPermission` for an unknown name, or
    /// `GrantedByOtherProvider` when the node itself is locked.
    pub fn toggle(&mut self, name: &str) -> Result<(), PermissionManagementError> {
        let node = self
            .permission(name)
            .ok_or_else(|| PermissionManagementError::UnknownPermission(name.to_owned()))?;
        if self.is_locked(node) {
            return Err(PermissionManagementError::GrantedByOtherProvider {
                name: name.to_owned(),
            });
        }

        let next = tree::toggle_permission(&self.current, name, self.cascade);
        self.apply_unlocked(next);
        Ok(())
    }

    /// Bulk toggle of the selected group's editable permissions.
    pub fn toggle_selected_group(&mut self) {
        let Some(members) = self.selected_group().map(|g| g.members.clone()) else {
            return;
        };
        let editable = self.editable(&members);
        self.current = tree::select_group(&self.current, &editable);
    }

    /// Bulk toggle of every editable permission in every group.
    pub fn toggle_all(&mut self) {
        let names: Vec<String> = self.current.iter().map(|p| p.name.clone()).collect();
        let editable = self.editable(&names);
        self.current = tree::select_group(&self.current, &editable);
    }

    /// Tri-state of one group's checkbox, over the same editable members
    /// that [`Self::toggle_selected_group`] changes.
    ///
    /// # Errors
    /// Returns `UnknownGroup` if no group has this name.
    pub fn group_state(&self, name: &str) -> Result<GrantState, PermissionManagementError> {
        let group = &self.groups[self.group_index(name)?];
        Ok(self.checkbox_state(&self.members_of(group)))
    }

    /// Tri-state of the "grant all" checkbox, over the same editable nodes
    /// that [`Self::toggle_all`] changes.
    ///
    /// Grants held through another provider are left out, unless every node
    /// is held that way.
    #[must_use]
    pub fn overall_state(&self) -> GrantState {
        self.checkbox_state(&self.current)
    }

    /// Number of granted permissions in a group, shown next to its name.
    ///
    /// # Errors
    /// Returns `UnknownGroup` if no group has this name.
    pub fn granted_count(&self, name: &str) -> Result<usize, PermissionManagementError> {
        let group = &self.groups[self.group_index(name)?];
        Ok(self
            .members_of(group)
            .iter()
            .filter(|p| p.is_granted)
            .count())
    }

    /// Changes relative to the fetched snapshot.
    #[must_use]
    pub fn changes(&self) -> Vec<UpdatePermissionDto> {
        tree::diff(&self.original, &self.current)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// Discard local edits.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.original);
    }

    /// The current state becomes the new baseline after a successful save.
    pub(crate) fn commit(&mut self) {
        self.original.clone_from(&self.current);
    }

    fn group_index(&self, name: &str) -> Result<usize, PermissionManagementError> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .ok_or_else(|| PermissionManagementError::UnknownGroup(name.to_owned()))
    }

    fn members_of(&self, group: &PermissionGroup) -> Vec<PermissionGrantInfoDto> {
        self.current
            .iter()
            .filter(|p| group.members.contains(&p.name))
            .cloned()
            .collect()
    }

    fn editable<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .filter(|name| self.permission(name).is_some_and(|p| !self.is_locked(p)))
            .map(String::as_str)
            .collect()
    }

    fn checkbox_state(&self, nodes: &[PermissionGrantInfoDto]) -> GrantState {
        let editable: Vec<PermissionGrantInfoDto> = nodes
            .iter()
            .filter(|p| !self.is_locked(p))
            .cloned()
            .collect();
        if editable.is_empty() {
            tree::grant_state(nodes)
        } else {
            tree::grant_state(&editable)
        }
    }

    fn apply_unlocked(&mut self, next: Vec<PermissionGrantInfoDto>) {
        for (current, next) in self.current.iter_mut().zip(next) {
            if !tree::is_granted_by_other_provider(current, &self.provider.provider_name) {
                current.is_granted = next.is_granted;
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
