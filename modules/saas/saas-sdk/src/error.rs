use adminkit::{ConfigError, RestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaasError {
    #[error(transparent)]
    Rest(#[from] RestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("connection string must not be empty unless the shared database is used")]
    InvalidConnectionString,
}

impl SaasError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            SaasError::Rest(err) => err.message(),
            other => other.to_string(),
        }
    }
}
