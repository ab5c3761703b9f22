//! Configuration for the permission management SDK.

use serde::Deserialize;

use crate::tree::CascadeMode;

/// Section name under `sdk.` in the environment configuration.
pub const SDK_NAME: &str = "permission-management";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionManagementConfig {
    /// Name of the configured API the proxy talks to.
    pub api_name: String,
    /// Propagation of a single checkbox toggle through the hierarchy.
    pub cascade: CascadeMode,
}

impl Default for PermissionManagementConfig {
    fn default() -> Self {
        Self {
            api_name: "PermissionManagement".to_owned(),
            cascade: CascadeMode::default(),
        }
    }
}
