//! Search filter - the exact filter combination of a popularity query

use chrono::NaiveDate;

/// Page size applied when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Filter combination for a "most popular repositories" query
///
/// Used verbatim as the cache key: two filters share an entry only when all
/// three fields are equal. An absent language and an empty language are
/// different keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilter {
    language: Option<String>,
    created_since: Option<NaiveDate>,
    page_size: Option<u32>,
}

impl SearchFilter {
    /// Creates a filter with no criteria
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_created_since(mut self, date: NaiveDate) -> Self {
        self.created_since = Some(date);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn created_since(&self) -> Option<NaiveDate> {
        self.created_since
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}
