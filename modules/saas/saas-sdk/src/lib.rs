//! SaaS SDK
//!
//! Editions, SaaS tenants and their connection strings:
//!
//! - [`EditionClient`] / [`EditionProxy`] - `/api/saas/editions`
//! - [`SaasTenantClient`] / [`SaasTenantProxy`] - `/api/saas/tenants`
//! - [`SaasStateService`] - cached edition and tenant pages, usage statistics

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod state;

use std::sync::Arc;

use adminkit::{EnvironmentConfig, RestClient, RestService, ServiceHub};

pub use api::{EditionClient, SaasTenantClient};
pub use config::{SDK_NAME, SaasConfig};
pub use error::SaasError;
pub use models::{
    EditionCreateDto, EditionDto, EditionUpdateDto, GetEditionsInput, GetSaasTenantsInput,
    SaasTenantConnectionStringsDto, SaasTenantCreateDto, SaasTenantDto, SaasTenantUpdateDto,
    UsageStatisticsDto,
};
pub use proxy::{EditionProxy, SaasTenantProxy};
pub use state::SaasStateService;

/// Register both clients and the state service of this SDK in `hub`.
///
/// # Errors
/// Returns `Config` if the SDK section is invalid or its API is not configured.
pub fn register_services(
    hub: &ServiceHub,
    transport: Arc<dyn RestService>,
    env: &EnvironmentConfig,
) -> Result<(), SaasError> {
    let config: SaasConfig = env.sdk_config_or_default(SDK_NAME)?;
    let rest = RestClient::for_api(transport, env, &config.api_name)?;
    tracing::debug!(api = %config.api_name, base_url = %rest.base_url(), "registering saas services");

    let editions: Arc<dyn EditionClient> = Arc::new(EditionProxy::new(rest.clone()));
    let tenants: Arc<dyn SaasTenantClient> = Arc::new(SaasTenantProxy::new(rest));
    hub.register::<dyn EditionClient>(editions.clone());
    hub.register::<dyn SaasTenantClient>(tenants.clone());
    hub.register(Arc::new(SaasStateService::new(editions, tenants, &config)));
    Ok(())
}
