//! Wire models of the permission management API.

use serde::{Deserialize, Deserializer, Serialize};

/// Provider name for role-scoped permission sets.
pub const ROLE_PROVIDER: &str = "R";
/// Provider name for user-scoped permission sets.
pub const USER_PROVIDER: &str = "U";

/// The entity a permission set is scoped to: a role or a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRef {
    pub provider_name: String,
    pub provider_key: String,
}

impl ProviderRef {
    pub fn new(provider_name: impl Into<String>, provider_key: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            provider_key: provider_key.into(),
        }
    }

    /// Permissions of a role, keyed by role name.
    pub fn role(role_name: impl Into<String>) -> Self {
        Self::new(ROLE_PROVIDER, role_name)
    }

    /// Permissions of a user, keyed by user id.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::new(USER_PROVIDER, user_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPermissionListResultDto {
    #[serde(default)]
    pub entity_display_name: String,
    #[serde(default)]
    pub groups: Vec<PermissionGroupDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGroupDto {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub permissions: Vec<PermissionGrantInfoDto>,
}

/// One node of the permission hierarchy.
///
/// `parent_name` is a back-reference by name, empty for top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrantInfoDto {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_name: String,
    #[serde(default)]
    pub is_granted: bool,
    #[serde(default)]
    pub allowed_providers: Vec<String>,
    #[serde(default)]
    pub granted_providers: Vec<ProviderInfoDto>,
}

impl PermissionGrantInfoDto {
    /// Minimal node, mostly useful for building trees in code.
    pub fn node(name: impl Into<String>, parent_name: impl Into<String>, is_granted: bool) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            is_granted,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoDto {
    pub provider_name: String,
    pub provider_key: String,
}

/// Body of the update call: only the changed subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionsDto {
    pub permissions: Vec<UpdatePermissionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionDto {
    pub name: String,
    pub is_granted: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
