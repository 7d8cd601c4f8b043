//! GitHub search API payload types
//!
//! Every item field is optional so that missing data is reported by the
//! conversion step with the offending field name instead of a generic
//! deserialization error.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response of `GET /search/repositories`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: Option<bool>,
    pub items: Vec<GitHubRepository>,
}

/// A single search result item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubRepository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub owner: Option<GitHubOwner>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
}

/// Owner of a search result item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubOwner {
    #[serde(default)]
    pub login: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "name": "spring-framework",
                "language": "Java",
                "description": null,
                "url": "https://api.github.com/repos/spring-projects/spring-framework",
                "owner": {"login": "spring-projects", "id": 317776},
                "created_at": "2010-12-08T04:04:45Z",
                "stargazers_count": 56000,
                "forks_count": 38000
            }]
        }"#;

        let response: GitHubSearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.total_count, Some(1));
        assert_eq!(response.items.len(), 1);

        let item = &response.items[0];
        assert_eq!(item.name.as_deref(), Some("spring-framework"));
        assert!(item.description.is_none());
        assert_eq!(
            item.owner.as_ref().and_then(|o| o.login.as_deref()),
            Some("spring-projects")
        );
        assert_eq!(item.stargazers_count, Some(56000));
    }

    #[test]
    fn test_missing_items_is_an_error() {
        let result: Result<GitHubSearchResponse, _> =
            serde_json::from_str(r#"{"total_count": 0}"#);
        assert!(result.is_err());
    }
}
