//! Wire models of the tenant management API.

use adminkit::{ExtraProperties, PagedAndSortedResultRequestDto, RestRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCreateDto {
    pub name: String,
    pub admin_email_address: String,
    pub admin_password: String,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

/// Update body. `concurrency_stamp` must echo the value last read, or the
/// server rejects the update as stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdateDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

impl From<&TenantDto> for TenantUpdateDto {
    fn from(tenant: &TenantDto) -> Self {
        Self {
            name: tenant.name.clone(),
            concurrency_stamp: tenant.concurrency_stamp.clone(),
            extra_properties: tenant.extra_properties.clone(),
        }
    }
}

/// Query of the tenant list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTenantsInput {
    pub filter: Option<String>,
    #[serde(flatten)]
    pub paging: PagedAndSortedResultRequestDto,
}

impl GetTenantsInput {
    #[must_use]
    pub fn filtered(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(&self, request: RestRequest) -> RestRequest {
        self.paging
            .apply_to(request)
            .param_opt("filter", self.filter.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tenant_from_server_payload() {
        let tenant: TenantDto = serde_json::from_value(json!({
            "id": "3a0e5d3c-7b56-4c17-9d3e-2f3a1b9f0c11",
            "name": "acme",
            "concurrencyStamp": "c1",
            "extraProperties": { "Plan": "gold" }
        }))
        .unwrap();
        assert_eq!(tenant.name, "acme");
        assert_eq!(tenant.concurrency_stamp.as_deref(), Some("c1"));
        assert_eq!(tenant.extra_properties["Plan"], "gold");
    }

    #[test]
    fn update_carries_concurrency_stamp() {
        let tenant = TenantDto {
            id: Uuid::nil(),
            name: "acme".to_owned(),
            concurrency_stamp: Some("c1".to_owned()),
            extra_properties: ExtraProperties::new(),
        };
        let body = serde_json::to_value(TenantUpdateDto::from(&tenant)).unwrap();
        assert_eq!(
            body,
            json!({ "name": "acme", "concurrencyStamp": "c1", "extraProperties": {} })
        );
    }

    #[test]
    fn query_skips_absent_values() {
        let input = GetTenantsInput {
            filter: Some("ac".to_owned()),
            paging: PagedAndSortedResultRequestDto::page(10),
        };
        let request = input.apply_to(RestRequest::get("/api/multi-tenancy/tenants"));
        assert_eq!(request.query("filter"), Some("ac"));
        assert_eq!(request.query("maxResultCount"), Some("10"));
        assert_eq!(request.query("sorting"), None);
    }
}
