use adminkit::PagedAndSortedResultRequestDto;
use serde::Deserialize;

pub const SDK_NAME: &str = "saas";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaasConfig {
    pub api_name: String,
    pub page_size: u64,
}

impl Default for SaasConfig {
    fn default() -> Self {
        Self {
            api_name: "Saas".to_owned(),
            page_size: 10,
        }
    }
}

impl SaasConfig {
    #[must_use]
    pub fn first_page(&self) -> PagedAndSortedResultRequestDto {
        PagedAndSortedResultRequestDto::page(self.page_size)
    }
}
