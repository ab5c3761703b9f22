//! Tenant Management SDK
//!
//! Host-side tenant administration: the [`TenantManagementClient`] REST
//! contract, its [`TenantProxy`] implementation and the
//! [`TenantStateService`] holding the current tenant page.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod state;

use std::sync::Arc;

use adminkit::{EnvironmentConfig, RestClient, RestService, ServiceHub};

pub use api::TenantManagementClient;
pub use config::{SDK_NAME, TenantManagementConfig};
pub use error::TenantManagementError;
pub use models::{GetTenantsInput, TenantCreateDto, TenantDto, TenantUpdateDto};
pub use proxy::TenantProxy;
pub use state::TenantStateService;

/// Register the client and the state service of this SDK in `hub`.
///
/// # Errors
/// Returns `Config` if the SDK section is invalid or its API is not configured.
pub fn register_services(
    hub: &ServiceHub,
    transport: Arc<dyn RestService>,
    env: &EnvironmentConfig,
) -> Result<(), TenantManagementError> {
    let config: TenantManagementConfig = env.sdk_config_or_default(SDK_NAME)?;
    let rest = RestClient::for_api(transport, env, &config.api_name)?;
    tracing::debug!(api = %config.api_name, base_url = %rest.base_url(), "registering tenant management services");

    let client: Arc<dyn TenantManagementClient> = Arc::new(TenantProxy::new(rest));
    hub.register::<dyn TenantManagementClient>(client.clone());
    hub.register(Arc::new(TenantStateService::new(client, &config)));
    Ok(())
}
