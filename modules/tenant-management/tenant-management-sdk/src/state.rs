//! Tenant list state.
//!
//! Mutations go through the client and then re-run the last list query, so
//! the cached page always reflects the server.

use std::sync::Arc;

use adminkit::ListState;
use parking_lot::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::api::TenantManagementClient;
use crate::config::TenantManagementConfig;
use crate::error::TenantManagementError;
use crate::models::{GetTenantsInput, TenantCreateDto, TenantDto, TenantUpdateDto};

pub struct TenantStateService {
    client: Arc<dyn TenantManagementClient>,
    tenants: ListState<TenantDto>,
    last_query: RwLock<GetTenantsInput>,
}

impl TenantStateService {
    #[must_use]
    pub fn new(client: Arc<dyn TenantManagementClient>, config: &TenantManagementConfig) -> Self {
        Self {
            client,
            tenants: ListState::new(),
            last_query: RwLock::new(GetTenantsInput {
                filter: None,
                paging: config.first_page(),
            }),
        }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn TenantManagementClient> {
        &self.client
    }

    /// Cached tenants of the last fetched page.
    #[must_use]
    pub fn tenants(&self) -> Vec<TenantDto> {
        self.tenants.items()
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.tenants.total_count()
    }

    #[must_use]
    pub fn last_query(&self) -> GetTenantsInput {
        self.last_query.read().clone()
    }

    /// Fetch a page and make `input` the query used by later refreshes.
    ///
    /// # Errors
    /// Returns the REST error of the list call; the cache is left unchanged.
    #[instrument(skip_all, fields(filter = ?input.filter))]
    pub async fn fetch(&self, input: GetTenantsInput) -> Result<(), TenantManagementError> {
        let page = self.client.get_list(&input).await?;
        debug!(items = page.items.len(), total = page.total_count, "tenant list refreshed");
        self.tenants.replace_page(page);
        *self.last_query.write() = input;
        Ok(())
    }

    /// Re-run the last query.
    ///
    /// # Errors
    /// Returns the REST error of the list call.
    pub async fn refresh(&self) -> Result<(), TenantManagementError> {
        let input = self.last_query();
        self.fetch(input).await
    }

    /// # Errors
    /// Returns the REST error of the call.
    pub async fn get(&self, id: Uuid) -> Result<TenantDto, TenantManagementError> {
        self.client.get(id).await
    }

    /// # Errors
    /// Returns the REST error of the create or of the refresh.
    pub async fn create(&self, input: &TenantCreateDto) -> Result<TenantDto, TenantManagementError> {
        let tenant = self.client.create(input).await?;
        self.refresh().await?;
        Ok(tenant)
    }

    /// # Errors
    /// Returns the REST error of the update or of the refresh.
    pub async fn update(
        &self,
        id: Uuid,
        input: &TenantUpdateDto,
    ) -> Result<TenantDto, TenantManagementError> {
        let tenant = self.client.update(id, input).await?;
        self.refresh().await?;
        Ok(tenant)
    }

    /// # Errors
    /// Returns the REST error of the delete or of the refresh.
    pub async fn delete(&self, id: Uuid) -> Result<(), TenantManagementError> {
        self.client.delete(id).await?;
        self.refresh().await
    }

    /// The tenant's own connection string, `None` when it uses the shared database.
    ///
    /// # Errors
    /// Returns the REST error of the call.
    pub async fn connection_string(&self, id: Uuid) -> Result<Option<String>, TenantManagementError> {
        self.client.get_default_connection_string(id).await
    }

    /// Save the connection-string form: `use_shared` removes the tenant's own
    /// connection string, otherwise `value` becomes it.
    ///
    /// # Errors
    /// Returns `InvalidConnectionString` for an empty dedicated value, or the
    /// REST error of the call.
    #[instrument(skip(self, value))]
    pub async fn save_connection_string(
        &self,
        id: Uuid,
        use_shared: bool,
        value: &str,
    ) -> Result<(), TenantManagementError> {
        if use_shared {
            return self.client.delete_default_connection_string(id).await;
        }
        if value.trim().is_empty() {
            return Err(TenantManagementError::InvalidConnectionString);
        }
        self.client.update_default_connection_string(id, value).await
    }
}
