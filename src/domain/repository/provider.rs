//! Repository provider trait definition

use async_trait::async_trait;

use super::{RepositoryRecord, SearchFilter, UpstreamError};

#[cfg(test)]
use mockall::automock;

/// Source of repositories ranked by popularity (stars, descending)
///
/// Implemented by the upstream client and by decorators around it, such as
/// the cache layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Fetches one page of repositories matching the filter
    async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<RepositoryRecord>, UpstreamError>;
}
