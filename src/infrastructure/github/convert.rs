//! Conversion from GitHub payloads to repository records

use crate::domain::{RepositoryRecord, UpstreamError};

use super::types::{GitHubRepository, GitHubSearchResponse};

/// Converts every item of a search response
///
/// A single malformed item fails the whole response.
pub fn to_repository_records(
    response: GitHubSearchResponse,
) -> Result<Vec<RepositoryRecord>, UpstreamError> {
    response
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_repository_record(index, item))
        .collect()
}

/// Converts one search result item by direct field copy
pub fn to_repository_record(
    index: usize,
    item: GitHubRepository,
) -> Result<RepositoryRecord, UpstreamError> {
    let missing =
        |field: &str| UpstreamError::malformed(format!("item {} is missing '{}'", index, field));

    let owner = item
        .owner
        .and_then(|owner| owner.login)
        .ok_or_else(|| missing("owner.login"))?;

    Ok(RepositoryRecord {
        name: item.name.ok_or_else(|| missing("name"))?,
        language: item.language,
        description: item.description,
        url: item.url.ok_or_else(|| missing("url"))?,
        owner,
        created_at: item.created_at.ok_or_else(|| missing("created_at"))?,
        star_count: item.stargazers_count.ok_or_else(|| missing("stargazers_count"))?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::super::types::GitHubOwner;
    use super::*;

    fn complete_item() -> GitHubRepository {
        GitHubRepository {
            name: Some("Spring".to_string()),
            language: Some("java".to_string()),
            description: Some("spring framework".to_string()),
            url: Some("NOP".to_string()),
            owner: Some(GitHubOwner {
                login: Some("pivotal".to_string()),
            }),
            created_at: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            stargazers_count: Some(5),
        }
    }

    #[test]
    fn test_maps_fields_from_the_client_to_the_record() {
        let record = to_repository_record(0, complete_item()).unwrap();

        assert_eq!(record.name, "Spring");
        assert_eq!(record.owner, "pivotal");
        assert_eq!(record.star_count, 5);
        assert_eq!(record.language.as_deref(), Some("java"));
        assert_eq!(record.description.as_deref(), Some("spring framework"));
        assert_eq!(record.url, "NOP");
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let item = GitHubRepository {
            language: None,
            description: None,
            ..complete_item()
        };

        let record = to_repository_record(0, item).unwrap();
        assert!(record.language.is_none());
        assert!(record.description.is_none());
    }

    #[test]
    fn test_missing_name_fails() {
        let item = GitHubRepository {
            name: None,
            ..complete_item()
        };

        let err = to_repository_record(3, item).unwrap_err();
        assert_eq!(err, UpstreamError::malformed("item 3 is missing 'name'"));
    }

    #[test]
    fn test_missing_owner_login_fails() {
        let item = GitHubRepository {
            owner: Some(GitHubOwner { login: None }),
            ..complete_item()
        };

        let err = to_repository_record(0, item).unwrap_err();
        assert!(err.to_string().contains("owner.login"));
    }

    #[test]
    fn test_one_malformed_item_fails_the_response() {
        let response = GitHubSearchResponse {
            total_count: Some(2),
            incomplete_results: Some(false),
            items: vec![
                complete_item(),
                GitHubRepository {
                    owner: None,
                    ..complete_item()
                },
            ],
        };

        let err = to_repository_records(response).unwrap_err();
        assert_eq!(err.kind(), "malformed_response");
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_empty_response_is_not_an_error() {
        let response = GitHubSearchResponse {
            total_count: Some(0),
            incomplete_results: Some(false),
            items: vec![],
        };

        assert!(to_repository_records(response).unwrap().is_empty());
    }
}
