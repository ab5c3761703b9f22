use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Fallback message when the server answers with something other than the
/// standard error envelope.
const GENERIC_ERROR_MESSAGE: &str = "An error has occurred!";

/// Error details returned by the backend inside `{ "error": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteServiceErrorInfo {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub validation_errors: Vec<RemoteValidationError>,
}

/// A single validation failure reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteValidationError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Deserialize)]
struct RemoteErrorEnvelope {
    error: RemoteServiceErrorInfo,
}

/// Errors produced while talking to the backend through a [`RestService`](crate::RestService).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RestError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .error.message)]
    Remote {
        status: u16,
        error: RemoteServiceErrorInfo,
    },

    /// The request never produced a response (connection, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected DTO.
    #[error("failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The API the request targets is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RestError {
    /// Builds a [`RestError::Remote`] from a status code and the raw response body.
    ///
    /// Bodies that are not the standard error envelope produce a generic message.
    #[must_use]
    pub fn from_response(status: u16, body: &serde_json::Value) -> Self {
        let error = serde_json::from_value::<RemoteErrorEnvelope>(body.clone())
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| RemoteServiceErrorInfo {
                message: GENERIC_ERROR_MESSAGE.to_owned(),
                ..RemoteServiceErrorInfo::default()
            });
        RestError::Remote { status, error }
    }

    /// Not-found error for a request path, in the backend's envelope shape.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        RestError::Remote {
            status: 404,
            error: RemoteServiceErrorInfo {
                message: format!("There is no entity or endpoint at '{path}'"),
                ..RemoteServiceErrorInfo::default()
            },
        }
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            RestError::Remote { error, .. } if !error.message.is_empty() => error.message.clone(),
            RestError::Remote { .. } => GENERIC_ERROR_MESSAGE.to_owned(),
            other => other.to_string(),
        }
    }

    /// HTTP status for remote failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_error_envelope() {
        let body = json!({
            "error": {
                "code": "Identity:DuplicateUserName",
                "message": "Username 'admin' is already taken.",
                "validationErrors": [
                    { "message": "The UserName field is required.", "members": ["userName"] }
                ]
            }
        });

        let err = RestError::from_response(400, &body);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Username 'admin' is already taken.");

        let RestError::Remote { error, .. } = err else {
            panic!("expected remote error");
        };
        assert_eq!(error.validation_errors.len(), 1);
        assert_eq!(error.validation_errors[0].members, vec!["userName"]);
    }

    #[test]
    fn non_envelope_body_yields_generic_message() {
        let err = RestError::from_response(502, &json!("Bad Gateway"));
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn transport_message_is_display_text() {
        let err = RestError::Transport("connection refused".to_owned());
        assert_eq!(err.message(), "transport error: connection refused");
        assert_eq!(err.status(), None);
    }
}
