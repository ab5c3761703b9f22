//! Permission Management SDK
//!
//! - [`PermissionManagementClient`] / [`PermissionsProxy`] - REST calls for a provider's grants
//! - [`tree`] - the permission hierarchy reconciler (depth, cascade toggle, bulk select, diff)
//! - [`PermissionEditSession`] - local edits of one provider's grants
//! - [`PermissionManagementState`] - opens sessions and saves their diff
//!
//! ```ignore
//! use permission_management_sdk::{PermissionManagementState, ProviderRef};
//!
//! permission_management_sdk::register_services(&hub, transport, &env)?;
//! let state = hub.get::<PermissionManagementState>()?;
//!
//! let mut session = state.open(ProviderRef::role("admin")).await?;
//! session.toggle("Identity.Roles.Create")?;
//! state.save(&mut session).await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod session;
pub mod state;
pub mod tree;

use std::sync::Arc;

use adminkit::{EnvironmentConfig, RestClient, RestService, ServiceHub};

pub use api::PermissionManagementClient;
pub use config::{PermissionManagementConfig, SDK_NAME};
pub use error::PermissionManagementError;
pub use models::{
    GetPermissionListResultDto, PermissionGrantInfoDto, PermissionGroupDto, ProviderInfoDto,
    ProviderRef, ROLE_PROVIDER, USER_PROVIDER, UpdatePermissionDto, UpdatePermissionsDto,
};
pub use proxy::PermissionsProxy;
pub use session::{PermissionEditSession, PermissionGroup, PermissionRow};
pub use state::{CurrentUser, PermissionManagementState, SaveOutcome};
pub use tree::{CascadeMode, GrantState};

/// Register the client and the state service of this SDK in `hub`.
///
/// # Errors
/// Returns `Config` if the SDK section is invalid or its API is not configured.
pub fn register_services(
    hub: &ServiceHub,
    transport: Arc<dyn RestService>,
    env: &EnvironmentConfig,
) -> Result<(), PermissionManagementError> {
    let config: PermissionManagementConfig = env.sdk_config_or_default(SDK_NAME)?;
    let rest = RestClient::for_api(transport, env, &config.api_name)?;
    tracing::debug!(api = %config.api_name, base_url = %rest.base_url(), cascade = ?config.cascade, "registering permission management services");

    let client: Arc<dyn PermissionManagementClient> = Arc::new(PermissionsProxy::new(rest));
    hub.register::<dyn PermissionManagementClient>(client.clone());
    hub.register(Arc::new(PermissionManagementState::new(client, config)));
    Ok(())
}
