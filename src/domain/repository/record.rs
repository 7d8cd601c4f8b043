//! Normalized repository records

use chrono::{DateTime, Utc};

/// Repository as normalized from an upstream search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub name: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub star_count: u64,
}

/// Repository as handed to callers of the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryView {
    pub name: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub star_count: u64,
}

impl From<&RepositoryRecord> for RepositoryView {
    fn from(record: &RepositoryRecord) -> Self {
        Self {
            name: record.name.clone(),
            language: record.language.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            owner: record.owner.clone(),
            created_at: record.created_at,
            star_count: record.star_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_view_copies_every_field() {
        let record = RepositoryRecord {
            name: "gateway-api".to_string(),
            language: Some("java".to_string()),
            description: Some("something nice".to_string()),
            url: "NOP".to_string(),
            owner: "William".to_string(),
            created_at: Utc.with_ymd_and_hms(1991, 12, 1, 15, 0, 0).unwrap(),
            star_count: 5000,
        };

        let view = RepositoryView::from(&record);

        assert_eq!(view.name, "gateway-api");
        assert_eq!(view.language.as_deref(), Some("java"));
        assert_eq!(view.description.as_deref(), Some("something nice"));
        assert_eq!(view.url, "NOP");
        assert_eq!(view.owner, "William");
        assert_eq!(view.created_at, record.created_at);
        assert_eq!(view.star_count, 5000);
    }
}
