//! Error types for the permission management SDK.

use adminkit::{ConfigError, RestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermissionManagementError {
    /// The backend call failed.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// SDK configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No group with this name in the edit session.
    #[error("unknown permission group: {0}")]
    UnknownGroup(String),

    /// No permission with this name in the edit session.
    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    /// The permission is granted through another provider and cannot be edited here.
    #[error("permission '{name}' is granted by another provider")]
    GrantedByOtherProvider { name: String },
}

impl PermissionManagementError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            PermissionManagementError::Rest(err) => err.message(),
            other => other.to_string(),
        }
    }
}
