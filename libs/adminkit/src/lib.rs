//! AdminKit core library
//!
//! Shared building blocks for the administration SDK crates:
//!
//! - [`RestService`] - the injected REST transport every proxy talks to
//! - [`RestClient`] / [`RestRequest`] - typed request building on top of it
//! - [`RestError`], [`RemoteServiceErrorInfo`] - the error model
//! - [`EnvironmentConfig`] - named API endpoints loaded through `figment`
//! - [`PagedResultDto`], [`PagedAndSortedResultRequestDto`] - paging DTOs
//! - [`ListState`] - cache of the last-fetched list for state services
//! - [`ServiceHub`] - explicit, session-scoped registry of clients and state services
//!
//! # Example
//!
//! ```ignore
//! use adminkit::{EnvironmentConfig, RestClient};
//!
//! let env = EnvironmentConfig::load(Some("adminkit.yaml".as_ref()))?;
//! let rest = RestClient::for_api(transport, &env, "Identity")?;
//!
//! let roles: Vec<RoleDto> = rest.send(RestRequest::get("/api/identity/roles/all")).await?;
//! ```

pub mod config;
pub mod error;
pub mod hub;
pub mod paging;
pub mod rest;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ApiEndpoint, ConfigError, DEFAULT_API_NAME, EnvironmentConfig};
pub use error::{RemoteServiceErrorInfo, RemoteValidationError, RestError};
pub use hub::{GLOBAL_SCOPE, ServiceHub, ServiceHubError};
pub use paging::{ExtraProperties, ListResultDto, PagedAndSortedResultRequestDto, PagedResultDto};
pub use rest::{RestClient, RestRequest, RestService, path_segment};
pub use state::{ListSnapshot, ListState};
