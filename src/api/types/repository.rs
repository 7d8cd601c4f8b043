//! Public repository types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RepositoryView, SearchFilter, DEFAULT_PAGE_SIZE};

/// Query parameters of `GET /v1/repositories`
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryQueryParams {
    pub language: Option<String>,
    #[serde(rename = "createdOn", alias = "createdSince")]
    pub created_on: Option<NaiveDate>,
    #[serde(default = "default_size", alias = "pageSize")]
    pub size: u32,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl RepositoryQueryParams {
    pub fn to_filter(&self) -> SearchFilter {
        let mut filter = SearchFilter::new().with_page_size(self.size);

        if let Some(language) = &self.language {
            filter = filter.with_language(language.clone());
        }
        if let Some(date) = self.created_on {
            filter = filter.with_created_since(date);
        }

        filter
    }
}

/// One repository as returned to API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResponse {
    pub name: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub stars: u64,
}

impl From<RepositoryView> for RepositoryResponse {
    fn from(view: RepositoryView) -> Self {
        Self {
            name: view.name,
            language: view.language,
            description: view.description,
            url: view.url,
            owner: view.owner,
            created_at: view.created_at,
            stars: view.star_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_params_default_size() {
        let params: RepositoryQueryParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.size, 50);
        assert_eq!(params.to_filter(), SearchFilter::new().with_page_size(50));
    }

    #[test]
    fn test_params_to_filter() {
        let params: RepositoryQueryParams =
            serde_json::from_str(r#"{"language":"rust","createdSince":"2019-01-10","pageSize":3}"#)
                .unwrap();

        let filter = params.to_filter();
        assert_eq!(filter.language(), Some("rust"));
        assert_eq!(filter.created_since(), NaiveDate::from_ymd_opt(2019, 1, 10));
        assert_eq!(filter.page_size(), Some(3));
    }

    #[test]
    fn test_response_field_names() {
        let response = RepositoryResponse::from(RepositoryView {
            name: "Spring".to_string(),
            language: Some("java".to_string()),
            description: None,
            url: "NOP".to_string(),
            owner: "pivotal".to_string(),
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            star_count: 5,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["stars"], 5);
        assert_eq!(json["createdAt"], "2020-01-01T00:00:00Z");
        assert!(json["description"].is_null());
    }
}
