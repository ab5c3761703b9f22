//! Identity SDK
//!
//! Role and user administration:
//!
//! - [`IdentityRoleClient`] / [`IdentityRoleProxy`] - `/api/identity/roles`
//! - [`IdentityUserClient`] / [`IdentityUserProxy`] - `/api/identity/users`
//! - [`IdentityStateService`] - cached role and user pages, role pickers

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod state;

use std::sync::Arc;

use adminkit::{EnvironmentConfig, RestClient, RestService, ServiceHub};

pub use api::{IdentityRoleClient, IdentityUserClient};
pub use config::{IdentityConfig, SDK_NAME};
pub use error::IdentityError;
pub use models::{
    GetIdentityUsersInput, IdentityRoleCreateDto, IdentityRoleDto, IdentityRoleUpdateDto,
    IdentityUserCreateDto, IdentityUserDto, IdentityUserUpdateDto, IdentityUserUpdateRolesDto,
    RoleAssignment,
};
pub use proxy::{IdentityRoleProxy, IdentityUserProxy};
pub use state::IdentityStateService;

/// Register both clients and the state service of this SDK in `hub`.
///
/// # Errors
/// Returns `Config` if the SDK section is invalid or its API is not configured.
pub fn register_services(
    hub: &ServiceHub,
    transport: Arc<dyn RestService>,
    env: &EnvironmentConfig,
) -> Result<(), IdentityError> {
    let config: IdentityConfig = env.sdk_config_or_default(SDK_NAME)?;
    let rest = RestClient::for_api(transport, env, &config.api_name)?;
    tracing::debug!(api = %config.api_name, base_url = %rest.base_url(), "registering identity services");

    let roles: Arc<dyn IdentityRoleClient> = Arc::new(IdentityRoleProxy::new(rest.clone()));
    let users: Arc<dyn IdentityUserClient> = Arc::new(IdentityUserProxy::new(rest));
    hub.register::<dyn IdentityRoleClient>(roles.clone());
    hub.register::<dyn IdentityUserClient>(users.clone());
    hub.register(Arc::new(IdentityStateService::new(roles, users, &config)));
    Ok(())
}
