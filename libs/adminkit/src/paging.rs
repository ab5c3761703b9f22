//! Paging and list envelopes shared by all SDKs.

use serde::{Deserialize, Serialize};

use crate::rest::RestRequest;

/// Free-form extension properties carried by extensible DTOs.
pub type ExtraProperties = serde_json::Map<String, serde_json::Value>;

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResultDto<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for PagedResultDto<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Unpaged list of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResultDto<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for ListResultDto<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Sorting and paging arguments of list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedAndSortedResultRequestDto {
    pub sorting: Option<String>,
    pub skip_count: Option<u64>,
    pub max_result_count: Option<u64>,
}

impl PagedAndSortedResultRequestDto {
    /// First page of `size` items.
    #[must_use]
    pub fn page(size: u64) -> Self {
        Self {
            sorting: None,
            skip_count: Some(0),
            max_result_count: Some(size),
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, sorting: impl Into<String>) -> Self {
        self.sorting = Some(sorting.into());
        self
    }

    /// Add `sorting`, `skipCount` and `maxResultCount` to the request, skipping absent values.
    pub fn apply_to(&self, request: RestRequest) -> RestRequest {
        request
            .param_opt("sorting", self.sorting.as_deref())
            .param_opt("skipCount", self.skip_count)
            .param_opt("maxResultCount", self.max_result_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_result_uses_camel_case() {
        let page: PagedResultDto<String> =
            serde_json::from_value(json!({ "items": ["a", "b"], "totalCount": 7 })).unwrap();
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.total_count, 7);
    }

    #[test]
    fn missing_fields_default() {
        let page: PagedResultDto<String> = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page, PagedResultDto::default());
    }

    #[test]
    fn apply_to_skips_absent_values() {
        let request = PagedAndSortedResultRequestDto::page(10)
            .sorted_by("name asc")
            .apply_to(RestRequest::get("/api/items"));
        assert_eq!(request.query("sorting"), Some("name asc"));
        assert_eq!(request.query("skipCount"), Some("0"));
        assert_eq!(request.query("maxResultCount"), Some("10"));

        let request =
            PagedAndSortedResultRequestDto::default().apply_to(RestRequest::get("/api/items"));
        assert!(request.params.is_empty());
    }
}
