use adminkit::PagedAndSortedResultRequestDto;
use serde::Deserialize;

pub const SDK_NAME: &str = "identity";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub api_name: String,
    /// Page size of the role and user lists before any query is issued.
    pub page_size: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_name: "Identity".to_owned(),
            page_size: 10,
        }
    }
}

impl IdentityConfig {
    #[must_use]
    pub fn first_page(&self) -> PagedAndSortedResultRequestDto {
        PagedAndSortedResultRequestDto::page(self.page_size)
    }
}
