use adminkit::{ConfigError, RestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    Rest(#[from] RestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Static roles are seeded by the system and cannot be deleted.
    #[error("role '{name}' is static and cannot be deleted")]
    StaticRole { name: String },
}

impl IdentityError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            IdentityError::Rest(err) => err.message(),
            other => other.to_string(),
        }
    }
}
