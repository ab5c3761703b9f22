//! Edition and SaaS tenant state.

use std::sync::Arc;

use adminkit::ListState;
use parking_lot::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::api::{EditionClient, SaasTenantClient};
use crate::config::SaasConfig;
use crate::error::SaasError;
use crate::models::{
    EditionCreateDto, EditionDto, EditionUpdateDto, GetEditionsInput, GetSaasTenantsInput,
    SaasTenantConnectionStringsDto, SaasTenantCreateDto, SaasTenantDto, SaasTenantUpdateDto,
    UsageStatisticsDto,
};

pub struct SaasStateService {
    editions_client: Arc<dyn EditionClient>,
    tenants_client: Arc<dyn SaasTenantClient>,
    editions: ListState<EditionDto>,
    tenants: ListState<SaasTenantDto>,
    usage_statistics: RwLock<Option<UsageStatisticsDto>>,
    edition_query: RwLock<GetEditionsInput>,
    tenant_query: RwLock<GetSaasTenantsInput>,
}

impl SaasStateService {
    #[must_use]
    pub fn new(
        editions_client: Arc<dyn EditionClient>,
        tenants_client: Arc<dyn SaasTenantClient>,
        config: &SaasConfig,
    ) -> Self {
        Self {
            editions_client,
            tenants_client,
            editions: ListState::new(),
            tenants: ListState::new(),
            usage_statistics: RwLock::new(None),
            edition_query: RwLock::new(GetEditionsInput {
                filter: None,
                paging: config.first_page(),
            }),
            tenant_query: RwLock::new(GetSaasTenantsInput {
                paging: config.first_page(),
                ..GetSaasTenantsInput::default()
            }),
        }
    }

    // ========== editions ==========

    #[must_use]
    pub fn editions(&self) -> Vec<EditionDto> {
        self.editions.items()
    }

    #[must_use]
    pub fn editions_total_count(&self) -> u64 {
        self.editions.total_count()
    }

    /// # Errors
    /// Returns the REST error of the list call.
    #[instrument(skip_all, fields(filter = ?input.filter))]
    pub async fn fetch_editions(&self, input: GetEditionsInput) -> Result<(), SaasError> {
        let page = self.editions_client.get_list(&input).await?;
        debug!(items = page.items.len(), total = page.total_count, "edition list refreshed");
        self.editions.replace_page(page);
        *self.edition_query.write() = input;
        Ok(())
    }

    /// # Errors
    /// Returns the REST error of the list call.
    pub async fn refresh_editions(&self) -> Result<(), SaasError> {
        let input = self.edition_query.read().clone();
        self.fetch_editions(input).await
    }

    /// # Errors
    /// Returns the REST error of the create or of the refresh.
    pub async fn create_edition(&self, input: &EditionCreateDto) -> Result<EditionDto, SaasError> {
        let edition = self.editions_client.create(input).await?;
        self.refresh_editions().await?;
        Ok(edition)
    }

    /// # Errors
    /// Returns the REST error of the update or of the refresh.
    pub async fn update_edition(
        &self,
        id: Uuid,
        input: &EditionUpdateDto,
    ) -> Result<EditionDto, SaasError> {
        let edition = self.editions_client.update(id, input).await?;
        self.refresh_editions().await?;
        Ok(edition)
    }

    /// # Errors
    /// Returns the REST error of the delete or of the refresh.
    pub async fn delete_edition(&self, id: Uuid) -> Result<(), SaasError> {
        self.editions_client.delete(id).await?;
        self.refresh_editions().await
    }

    /// Last fetched usage statistics, if any.
    #[must_use]
    pub fn usage_statistics(&self) -> Option<UsageStatisticsDto> {
        self.usage_statistics.read().clone()
    }

    /// # Errors
    /// Returns the REST error of the call; the cached statistics are kept.
    pub async fn fetch_usage_statistics(&self) -> Result<UsageStatisticsDto, SaasError> {
        let stats = self.editions_client.get_usage_statistics().await?;
        *self.usage_statistics.write() = Some(stats.clone());
        Ok(stats)
    }

    // ========== tenants ==========

    #[must_use]
    pub fn tenants(&self) -> Vec<SaasTenantDto> {
        self.tenants.items()
    }

    #[must_use]
    pub fn tenants_total_count(&self) -> u64 {
        self.tenants.total_count()
    }

    /// Cached tenants subscribed to `edition_id`.
    #[must_use]
    pub fn tenants_of_edition(&self, edition_id: Uuid) -> Vec<SaasTenantDto> {
        self.tenants
            .snapshot()
            .items
            .iter()
            .filter(|t| t.edition_id == Some(edition_id))
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns the REST error of the list call.
    #[instrument(skip_all, fields(filter = ?input.filter))]
    pub async fn fetch_tenants(&self, input: GetSaasTenantsInput) -> Result<(), SaasError> {
        let page = self.tenants_client.get_list(&input).await?;
        debug!(items = page.items.len(), total = page.total_count, "tenant list refreshed");
        self.tenants.replace_page(page);
        *self.tenant_query.write() = input;
        Ok(())
    }

    /// # Errors
    /// Returns the REST error of the list call.
    pub async fn refresh_tenants(&self) -> Result<(), SaasError> {
        let input = self.tenant_query.read().clone();
        self.fetch_tenants(input).await
    }

    /// # Errors
    /// Returns the REST error of the create or of the refresh.
    pub async fn create_tenant(
        &self,
        input: &SaasTenantCreateDto,
    ) -> Result<SaasTenantDto, SaasError> {
        let tenant = self.tenants_client.create(input).await?;
        self.refresh_tenants().await?;
        Ok(tenant)
    }

    /// # Errors
    /// Returns the REST error of the update or of the refresh.
    pub async fn update_tenant(
        &self,
        id: Uuid,
        input: &SaasTenantUpdateDto,
    ) -> Result<SaasTenantDto, SaasError> {
        let tenant = self.tenants_client.update(id, input).await?;
        self.refresh_tenants().await?;
        Ok(tenant)
    }

    /// # Errors
    /// Returns the REST error of the delete or of the refresh.
    pub async fn delete_tenant(&self, id: Uuid) -> Result<(), SaasError> {
        self.tenants_client.delete(id).await?;
        self.refresh_tenants().await
    }

    /// # Errors
    /// Returns the REST error of the call.
    pub async fn connection_strings(
        &self,
        id: Uuid,
    ) -> Result<SaasTenantConnectionStringsDto, SaasError> {
        self.tenants_client.get_connection_strings(id).await
    }

    /// Save the default connection string: `use_shared` clears it, otherwise
    /// `value` becomes it.
    ///
    /// # Errors
    /// Returns `InvalidConnectionString` for an empty dedicated value, or the
    /// REST error of the call.
    #[instrument(skip(self, value))]
    pub async fn save_default_connection_string(
        &self,
        id: Uuid,
        use_shared: bool,
        value: &str,
    ) -> Result<(), SaasError> {
        let default = if use_shared {
            None
        } else {
            if value.trim().is_empty() {
                return Err(SaasError::InvalidConnectionString);
            }
            Some(value.to_owned())
        };
        self.tenants_client
            .update_connection_strings(id, &SaasTenantConnectionStringsDto { default })
            .await
    }
}
