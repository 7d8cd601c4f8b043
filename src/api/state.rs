//! Application state for shared services

use std::sync::Arc;

use crate::domain::CircuitBreaker;
use crate::infrastructure::cache::CachedRepositoryProvider;
use crate::infrastructure::services::RepositoryService;

#[derive(Clone)]
pub struct AppState {
    pub repository_service: Arc<RepositoryService>,
    pub breaker: Arc<CircuitBreaker>,
    pub cache: Arc<CachedRepositoryProvider>,
}

impl AppState {
    pub fn new(
        repository_service: Arc<RepositoryService>,
        cache: Arc<CachedRepositoryProvider>,
    ) -> Self {
        Self {
            breaker: Arc::clone(repository_service.breaker()),
            repository_service,
            cache,
        }
    }
}
