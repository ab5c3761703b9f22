use adminkit::{PagedResultDto, RestClient, RestRequest};
use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::api::TenantManagementClient;
use crate::error::TenantManagementError;
use crate::models::{GetTenantsInput, TenantCreateDto, TenantDto, TenantUpdateDto};

const TENANTS_URL: &str = "/api/multi-tenancy/tenants";

#[derive(Debug, Clone)]
pub struct TenantProxy {
    rest: RestClient,
}

impl TenantProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

fn tenant_url(id: Uuid) -> String {
    format!("{TENANTS_URL}/{id}")
}

fn connection_string_url(id: Uuid) -> String {
    format!("{TENANTS_URL}/{id}/default-connection-string")
}

#[async_trait]
impl TenantManagementClient for TenantProxy {
    #[instrument(skip_all, fields(filter = ?input.filter))]
    async fn get_list(
        &self,
        input: &GetTenantsInput,
    ) -> Result<PagedResultDto<TenantDto>, TenantManagementError> {
        let request = input.apply_to(RestRequest::get(TENANTS_URL));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<TenantDto, TenantManagementError> {
        Ok(self.rest.send(RestRequest::get(tenant_url(id))).await?)
    }

    #[instrument(skip_all, fields(name = %input.name))]
    async fn create(&self, input: &TenantCreateDto) -> Result<TenantDto, TenantManagementError> {
        let request = RestRequest::post(TENANTS_URL).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: &TenantUpdateDto,
    ) -> Result<TenantDto, TenantManagementError> {
        let request = RestRequest::put(tenant_url(id)).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), TenantManagementError> {
        Ok(self.rest.send_unit(RestRequest::delete(tenant_url(id))).await?)
    }

    #[instrument(skip(self))]
    async fn get_default_connection_string(
        &self,
        id: Uuid,
    ) -> Result<Option<String>, TenantManagementError> {
        Ok(self
            .rest
            .send_text(RestRequest::get(connection_string_url(id)))
            .await?)
    }

    #[instrument(skip(self, connection_string))]
    async fn update_default_connection_string(
        &self,
        id: Uuid,
        connection_string: &str,
    ) -> Result<(), TenantManagementError> {
        let request = RestRequest::put(connection_string_url(id))
            .param("defaultConnectionString", connection_string);
        Ok(self.rest.send_unit(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete_default_connection_string(
        &self,
        id: Uuid,
    ) -> Result<(), TenantManagementError> {
        Ok(self
            .rest
            .send_unit(RestRequest::delete(connection_string_url(id)))
            .await?)
    }
}
