use adminkit::{ConfigError, RestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantManagementError {
    #[error(transparent)]
    Rest(#[from] RestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A dedicated connection string was requested but none was given.
    #[error("connection string must not be empty unless the shared database is used")]
    InvalidConnectionString,
}

impl TenantManagementError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            TenantManagementError::Rest(err) => err.message(),
            other => other.to_string(),
        }
    }
}
