//! Upstream search query builder
//!
//! Syntax reference:
//! <https://docs.github.com/en/search-github/searching-on-github/searching-for-repositories>

use chrono::NaiveDate;

/// Query sent when no criteria are given. The upstream treats it as "match
/// everything" and returns results in alphabetical order.
const MATCH_ALL_QUERY: &str = "a";

/// Separator between qualifiers; the upstream reads it as a space
pub const CLAUSE_SEPARATOR: char = '+';

/// Qualifiers of the upstream search query, date clause first
///
/// Never empty. Each clause is opaque text: the language value is copied
/// verbatim and may itself contain the separator character.
pub fn query_clauses(language: Option<&str>, created_since: Option<NaiveDate>) -> Vec<String> {
    let mut clauses = Vec::with_capacity(2);

    if let Some(date) = created_since {
        clauses.push(format!("created:>{}", date.format("%Y-%m-%d")));
    }

    if let Some(language) = language {
        clauses.push(format!("language:{}", language));
    }

    if clauses.is_empty() {
        clauses.push(MATCH_ALL_QUERY.to_string());
    }

    clauses
}

/// Builds the `q` parameter of the upstream search request
pub fn build_query(language: Option<&str>, created_since: Option<NaiveDate>) -> String {
    query_clauses(language, created_since).join(&CLAUSE_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 10).unwrap()
    }

    #[test]
    fn test_no_criteria_uses_match_all_token() {
        assert_eq!(build_query(None, None), "a");
    }

    #[test]
    fn test_date_only() {
        assert_eq!(build_query(None, Some(date())), "created:>2019-01-10");
    }

    #[test]
    fn test_language_only_has_no_separator() {
        assert_eq!(build_query(Some("JAVA"), None), "language:JAVA");
    }

    #[test]
    fn test_date_and_language() {
        assert_eq!(
            build_query(Some("JAVA"), Some(date())),
            "created:>2019-01-10+language:JAVA"
        );
    }

    #[test]
    fn test_language_is_passed_through_opaquely() {
        assert_eq!(build_query(Some("c++ "), None), "language:c++ ");
        assert_eq!(build_query(Some(""), None), "language:");
    }

    #[test]
    fn test_clauses_keep_language_separate() {
        assert_eq!(
            query_clauses(Some("c++"), Some(date())),
            vec!["created:>2019-01-10".to_string(), "language:c++".to_string()]
        );
        assert_eq!(query_clauses(None, None), vec!["a".to_string()]);
    }

    #[test]
    fn test_single_digit_dates_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(build_query(None, Some(date)), "created:>2021-03-07");
    }
}
