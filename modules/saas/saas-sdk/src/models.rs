//! Wire models of the SaaS API.

use std::collections::BTreeMap;

use adminkit::{ExtraProperties, PagedAndSortedResultRequestDto, RestRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ========== editions ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionDto {
    pub id: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionCreateDto {
    pub display_name: String,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionUpdateDto {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

impl From<&EditionDto> for EditionUpdateDto {
    fn from(edition: &EditionDto) -> Self {
        Self {
            display_name: edition.display_name.clone(),
            concurrency_stamp: edition.concurrency_stamp.clone(),
            extra_properties: edition.extra_properties.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEditionsInput {
    pub filter: Option<String>,
    #[serde(flatten)]
    pub paging: PagedAndSortedResultRequestDto,
}

impl GetEditionsInput {
    pub(crate) fn apply_to(&self, request: RestRequest) -> RestRequest {
        self.paging
            .apply_to(request)
            .param_opt("filter", self.filter.as_deref())
    }
}

/// Tenant count per edition display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatisticsDto {
    #[serde(default)]
    pub data: BTreeMap<String, u64>,
}

// ========== tenants ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaasTenantDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub edition_id: Option<Uuid>,
    /// Filled only when the list was requested with `getEditionNames`.
    #[serde(default)]
    pub edition_name: Option<String>,
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaasTenantCreateDto {
    pub name: String,
    pub edition_id: Option<Uuid>,
    pub admin_email_address: String,
    pub admin_password: String,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaasTenantUpdateDto {
    pub name: String,
    pub edition_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

impl From<&SaasTenantDto> for SaasTenantUpdateDto {
    fn from(tenant: &SaasTenantDto) -> Self {
        Self {
            name: tenant.name.clone(),
            edition_id: tenant.edition_id,
            concurrency_stamp: tenant.concurrency_stamp.clone(),
            extra_properties: tenant.extra_properties.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSaasTenantsInput {
    pub filter: Option<String>,
    /// Ask the server to fill [`SaasTenantDto::edition_name`].
    pub get_edition_names: bool,
    #[serde(flatten)]
    pub paging: PagedAndSortedResultRequestDto,
}

impl Default for GetSaasTenantsInput {
    fn default() -> Self {
        Self {
            filter: None,
            get_edition_names: true,
            paging: PagedAndSortedResultRequestDto::default(),
        }
    }
}

impl GetSaasTenantsInput {
    pub(crate) fn apply_to(&self, request: RestRequest) -> RestRequest {
        self.paging
            .apply_to(request)
            .param_opt("filter", self.filter.as_deref())
            .param("getEditionNames", self.get_edition_names)
    }
}

/// Connection strings of a SaaS tenant. A `None` default means the shared database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaasTenantConnectionStringsDto {
    #[serde(default)]
    pub default: Option<String>,
}
