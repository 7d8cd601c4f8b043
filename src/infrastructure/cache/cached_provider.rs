use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::domain::{RepositoryProvider, RepositoryRecord, SearchFilter, UpstreamError};

/// Configuration for the repository result cache
#[derive(Debug, Clone)]
pub struct RepositoryCacheConfig {
    /// Maximum number of distinct filters kept
    pub max_capacity: u64,
    /// Entry lifetime; `None` keeps entries until evicted by capacity
    pub ttl: Option<Duration>,
    /// Entries not read for this duration are evicted
    pub time_to_idle: Option<Duration>,
}

impl Default for RepositoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            ttl: Some(Duration::from_secs(300)),
            time_to_idle: None,
        }
    }
}

impl RepositoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_time_to_idle(mut self, tti: Duration) -> Self {
        self.time_to_idle = Some(tti);
        self
    }
}

/// Repository provider wrapper that memoizes results per filter
///
/// Concurrent misses for the same filter share a single upstream call.
/// Failed or cancelled computations leave no entry behind.
pub struct CachedRepositoryProvider {
    inner: Arc<dyn RepositoryProvider>,
    cache: Cache<SearchFilter, Arc<Vec<RepositoryRecord>>>,
}

impl std::fmt::Debug for CachedRepositoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRepositoryProvider")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl CachedRepositoryProvider {
    pub fn new(inner: Arc<dyn RepositoryProvider>, config: RepositoryCacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(tti) = config.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        Self {
            inner,
            cache: builder.build(),
        }
    }

    /// Returns the cached result for `filter` or runs `compute` to fill it
    pub async fn get_or_compute<F>(
        &self,
        filter: SearchFilter,
        compute: F,
    ) -> Result<Arc<Vec<RepositoryRecord>>, UpstreamError>
    where
        F: Future<Output = Result<Vec<RepositoryRecord>, UpstreamError>>,
    {
        self.cache
            .try_get_with(filter, async move { compute.await.map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Evicts the entry for `filter`, returning whether one was present
    pub async fn invalidate(&self, filter: &SearchFilter) -> bool {
        self.cache.remove(filter).await.is_some()
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn contains(&self, filter: &SearchFilter) -> bool {
        self.cache.contains_key(filter)
    }

    /// Approximate number of cached filters
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl RepositoryProvider for CachedRepositoryProvider {
    async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<RepositoryRecord>, UpstreamError> {
        let inner = Arc::clone(&self.inner);
        let key = filter.clone();

        let records = self
            .get_or_compute(filter.clone(), async move {
                tracing::debug!(filter = ?key, "Cache miss, querying upstream");
                inner.fetch(&key).await
            })
            .await?;

        Ok(records.as_ref().clone())
    }
}
