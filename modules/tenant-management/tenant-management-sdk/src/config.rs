use adminkit::PagedAndSortedResultRequestDto;
use serde::Deserialize;

pub const SDK_NAME: &str = "tenant-management";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantManagementConfig {
    pub api_name: String,
    /// Page size used when no query has been issued yet.
    pub page_size: u64,
}

impl Default for TenantManagementConfig {
    fn default() -> Self {
        Self {
            api_name: "TenantManagement".to_owned(),
            page_size: 10,
        }
    }
}

impl TenantManagementConfig {
    #[must_use]
    pub fn first_page(&self) -> PagedAndSortedResultRequestDto {
        PagedAndSortedResultRequestDto::page(self.page_size)
    }
}
