//! Wire models of the identity API.

use adminkit::{ExtraProperties, PagedAndSortedResultRequestDto, RestRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ========== roles ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRoleDto {
    pub id: Uuid,
    pub name: String,
    /// Assigned to new users automatically.
    #[serde(default)]
    pub is_default: bool,
    /// Seeded by the system; cannot be renamed or deleted.
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRoleCreateDto {
    pub name: String,
    pub is_default: bool,
    pub is_public: bool,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRoleUpdateDto {
    pub name: String,
    pub is_default: bool,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

impl From<&IdentityRoleDto> for IdentityRoleUpdateDto {
    fn from(role: &IdentityRoleDto) -> Self {
        Self {
            name: role.name.clone(),
            is_default: role.is_default,
            is_public: role.is_public,
            concurrency_stamp: role.concurrency_stamp.clone(),
            extra_properties: role.extra_properties.clone(),
        }
    }
}

// ========== users ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUserDto {
    pub id: Uuid,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    pub user_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_confirmed: bool,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_number_confirmed: bool,
    #[serde(default)]
    pub lockout_enabled: bool,
    #[serde(default)]
    pub lockout_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

impl IdentityUserDto {
    /// Whether the user is locked out at `now`.
    #[must_use]
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_enabled && self.lockout_end.is_some_and(|end| end > now)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUserCreateDto {
    pub user_name: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub lockout_enabled: bool,
    pub password: String,
    pub role_names: Vec<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

/// Update body. A `None` password leaves the current one unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUserUpdateDto {
    pub user_name: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub lockout_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    #[serde(default)]
    pub extra_properties: ExtraProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUserUpdateRolesDto {
    pub role_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIdentityUsersInput {
    pub filter: Option<String>,
    #[serde(flatten)]
    pub paging: PagedAndSortedResultRequestDto,
}

impl GetIdentityUsersInput {
    pub(crate) fn apply_to(&self, request: RestRequest) -> RestRequest {
        self.paging
            .apply_to(request)
            .param_opt("filter", self.filter.as_deref())
    }
}

/// One line of the role picker of a user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub name: String,
    pub is_assigned: bool,
}
