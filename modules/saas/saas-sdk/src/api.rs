use adminkit::PagedResultDto;
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SaasError;
use crate::models::{
    EditionCreateDto, EditionDto, EditionUpdateDto, GetEditionsInput, GetSaasTenantsInput,
    SaasTenantConnectionStringsDto, SaasTenantCreateDto, SaasTenantDto, SaasTenantUpdateDto,
    UsageStatisticsDto,
};

#[async_trait]
pub trait EditionClient: Send + Sync {
    async fn get_list(
        &self,
        input: &GetEditionsInput,
    ) -> Result<PagedResultDto<EditionDto>, SaasError>;

    async fn get(&self, id: Uuid) -> Result<EditionDto, SaasError>;

    async fn create(&self, input: &EditionCreateDto) -> Result<EditionDto, SaasError>;

    async fn update(&self, id: Uuid, input: &EditionUpdateDto) -> Result<EditionDto, SaasError>;

    async fn delete(&self, id: Uuid) -> Result<(), SaasError>;

    /// Number of tenants per edition.
    async fn get_usage_statistics(&self) -> Result<UsageStatisticsDto, SaasError>;
}

#[async_trait]
pub trait SaasTenantClient: Send + Sync {
    async fn get_list(
        &self,
        input: &GetSaasTenantsInput,
    ) -> Result<PagedResultDto<SaasTenantDto>, SaasError>;

    async fn get(&self, id: Uuid) -> Result<SaasTenantDto, SaasError>;

    async fn create(&self, input: &SaasTenantCreateDto) -> Result<SaasTenantDto, SaasError>;

    async fn update(
        &self,
        id: Uuid,
        input: &SaasTenantUpdateDto,
    ) -> Result<SaasTenantDto, SaasError>;

    async fn delete(&self, id: Uuid) -> Result<(), SaasError>;

    async fn get_connection_strings(
        &self,
        id: Uuid,
    ) -> Result<SaasTenantConnectionStringsDto, SaasError>;

    async fn update_connection_strings(
        &self,
        id: Uuid,
        input: &SaasTenantConnectionStringsDto,
    ) -> Result<(), SaasError>;
}
