use adminkit::{PagedResultDto, RestClient, RestRequest};
use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::api::{EditionClient, SaasTenantClient};
use crate::error::SaasError;
use crate::models::{
    EditionCreateDto, EditionDto, EditionUpdateDto, GetEditionsInput, GetSaasTenantsInput,
    SaasTenantConnectionStringsDto, SaasTenantCreateDto, SaasTenantDto, SaasTenantUpdateDto,
    UsageStatisticsDto,
};

const EDITIONS_URL: &str = "/api/saas/editions";
const TENANTS_URL: &str = "/api/saas/tenants";

#[derive(Debug, Clone)]
pub struct EditionProxy {
    rest: RestClient,
}

impl EditionProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl EditionClient for EditionProxy {
    #[instrument(skip_all, fields(filter = ?input.filter))]
    async fn get_list(
        &self,
        input: &GetEditionsInput,
    ) -> Result<PagedResultDto<EditionDto>, SaasError> {
        let request = input.apply_to(RestRequest::get(EDITIONS_URL));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<EditionDto, SaasError> {
        Ok(self
            .rest
            .send(RestRequest::get(format!("{EDITIONS_URL}/{id}")))
            .await?)
    }

    #[instrument(skip_all, fields(display_name = %input.display_name))]
    async fn create(&self, input: &EditionCreateDto) -> Result<EditionDto, SaasError> {
        let request = RestRequest::post(EDITIONS_URL).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: &EditionUpdateDto) -> Result<EditionDto, SaasError> {
        let request = RestRequest::put(format!("{EDITIONS_URL}/{id}")).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), SaasError> {
        Ok(self
            .rest
            .send_unit(RestRequest::delete(format!("{EDITIONS_URL}/{id}")))
            .await?)
    }

    #[instrument(skip_all)]
    async fn get_usage_statistics(&self) -> Result<UsageStatisticsDto, SaasError> {
        let request = RestRequest::get(format!("{EDITIONS_URL}/statistics/usage-statistic"));
        Ok(self.rest.send(request).await?)
    }
}

#[derive(Debug, Clone)]
pub struct SaasTenantProxy {
    rest: RestClient,
}

impl SaasTenantProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl SaasTenantClient for SaasTenantProxy {
    #[instrument(skip_all, fields(filter = ?input.filter))]
    async fn get_list(
        &self,
        input: &GetSaasTenantsInput,
    ) -> Result<PagedResultDto<SaasTenantDto>, SaasError> {
        let request = input.apply_to(RestRequest::get(TENANTS_URL));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<SaasTenantDto, SaasError> {
        Ok(self
            .rest
            .send(RestRequest::get(format!("{TENANTS_URL}/{id}")))
            .await?)
    }

    #[instrument(skip_all, fields(name = %input.name))]
    async fn create(&self, input: &SaasTenantCreateDto) -> Result<SaasTenantDto, SaasError> {
        let request = RestRequest::post(TENANTS_URL).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: &SaasTenantUpdateDto,
    ) -> Result<SaasTenantDto, SaasError> {
        let request = RestRequest::put(format!("{TENANTS_URL}/{id}")).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), SaasError> {
        Ok(self
            .rest
            .send_unit(RestRequest::delete(format!("{TENANTS_URL}/{id}")))
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_connection_strings(
        &self,
        id: Uuid,
    ) -> Result<SaasTenantConnectionStringsDto, SaasError> {
        let request = RestRequest::get(format!("{TENANTS_URL}/{id}/connection-strings"));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update_connection_strings(
        &self,
        id: Uuid,
        input: &SaasTenantConnectionStringsDto,
    ) -> Result<(), SaasError> {
        let request =
            RestRequest::put(format!("{TENANTS_URL}/{id}/connection-strings")).json(input)?;
        Ok(self.rest.send_unit(request).await?)
    }
}
