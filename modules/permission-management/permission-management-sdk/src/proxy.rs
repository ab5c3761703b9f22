use adminkit::{RestClient, RestRequest};
use async_trait::async_trait;
use tracing::instrument;

use crate::api::PermissionManagementClient;
use crate::error::PermissionManagementError;
use crate::models::{GetPermissionListResultDto, ProviderRef, UpdatePermissionsDto};

const PERMISSIONS_URL: &str = "/api/permission-management/permissions";

/// REST proxy for the permission management endpoints.
#[derive(Debug, Clone)]
pub struct PermissionsProxy {
    rest: RestClient,
}

impl PermissionsProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

fn with_provider(request: RestRequest, provider: &ProviderRef) -> RestRequest {
    request
        .param("providerName", &provider.provider_name)
        .param("providerKey", &provider.provider_key)
}

#[async_trait]
impl PermissionManagementClient for PermissionsProxy {
    #[instrument(skip_all, fields(provider_name = %provider.provider_name, provider_key = %provider.provider_key))]
    async fn get(
        &self,
        provider: &ProviderRef,
    ) -> Result<GetPermissionListResultDto, PermissionManagementError> {
        let request = with_provider(RestRequest::get(PERMISSIONS_URL), provider);
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip_all, fields(provider_name = %provider.provider_name, provider_key = %provider.provider_key, changed = input.permissions.len()))]
    async fn update(
        &self,
        provider: &ProviderRef,
        input: &UpdatePermissionsDto,
    ) -> Result<(), PermissionManagementError> {
        let request = with_provider(RestRequest::put(PERMISSIONS_URL), provider).json(input)?;
        Ok(self.rest.send_unit(request).await?)
    }
}
