use adminkit::PagedResultDto;
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TenantManagementError;
use crate::models::{GetTenantsInput, TenantCreateDto, TenantDto, TenantUpdateDto};

/// Client for the host-side tenant administration endpoints.
#[async_trait]
pub trait TenantManagementClient: Send + Sync {
    async fn get_list(
        &self,
        input: &GetTenantsInput,
    ) -> Result<PagedResultDto<TenantDto>, TenantManagementError>;

    async fn get(&self, id: Uuid) -> Result<TenantDto, TenantManagementError>;

    async fn create(&self, input: &TenantCreateDto) -> Result<TenantDto, TenantManagementError>;

    async fn update(
        &self,
        id: Uuid,
        input: &TenantUpdateDto,
    ) -> Result<TenantDto, TenantManagementError>;

    async fn delete(&self, id: Uuid) -> Result<(), TenantManagementError>;

    /// The tenant's own connection string; `None` when it uses the shared database.
    async fn get_default_connection_string(
        &self,
        id: Uuid,
    ) -> Result<Option<String>, TenantManagementError>;

    async fn update_default_connection_string(
        &self,
        id: Uuid,
        connection_string: &str,
    ) -> Result<(), TenantManagementError>;

    /// Switch the tenant back to the shared database.
    async fn delete_default_connection_string(&self, id: Uuid)
    -> Result<(), TenantManagementError>;
}
