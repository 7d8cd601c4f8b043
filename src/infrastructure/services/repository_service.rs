//! Repository service - breaker-guarded retrieval with empty fallback

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error};

use crate::domain::{
    BreakerOpenError, CircuitBreaker, RepositoryProvider, RepositoryRecord, RepositoryView,
    SearchFilter, UpstreamError,
};
use crate::infrastructure::observability::record_fallback;

/// Why a guarded call produced no data
#[derive(Debug, Error)]
enum RetrievalError {
    #[error(transparent)]
    Rejected(#[from] BreakerOpenError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RetrievalError {
    fn reason(&self) -> &'static str {
        match self {
            RetrievalError::Rejected(_) => "circuit_open",
            RetrievalError::Upstream(e) => e.kind(),
        }
    }
}

/// Entry point for "most popular repositories" queries
///
/// Never fails: an open breaker or any upstream failure degrades to an
/// empty result, which is logged and counted.
#[derive(Clone)]
pub struct RepositoryService {
    provider: Arc<dyn RepositoryProvider>,
    breaker: Arc<CircuitBreaker>,
    call_timeout: Option<Duration>,
}

impl std::fmt::Debug for RepositoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryService")
            .field("breaker", &self.breaker.name())
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl RepositoryService {
    pub fn new(provider: Arc<dyn RepositoryProvider>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            provider,
            breaker,
            call_timeout: None,
        }
    }

    /// Bounds each guarded call; an elapsed call counts as a timeout failure
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    pub async fn find_most_popular(&self, filter: &SearchFilter) -> Vec<RepositoryView> {
        match self.guarded_fetch(filter).await {
            Ok(records) => records.iter().map(RepositoryView::from).collect(),
            Err(e) => {
                error!(
                    error = %e,
                    reason = e.reason(),
                    filter = ?filter,
                    "Repository search failed, returning empty fallback"
                );
                record_fallback(e.reason());
                Vec::new()
            }
        }
    }

    async fn guarded_fetch(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<RepositoryRecord>, RetrievalError> {
        let permit = self.breaker.try_acquire()?;

        let result = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.fetch(filter))
                .await
                .unwrap_or_else(|_| Err(UpstreamError::timeout(limit.as_millis() as u64))),
            None => self.provider.fetch(filter).await,
        };

        match result {
            Ok(records) => {
                permit.record_success();
                debug!(count = records.len(), "Repository search succeeded");
                Ok(records)
            }
            Err(e) => {
                permit.record_failure();
                Err(e.into())
            }
        }
    }
}
