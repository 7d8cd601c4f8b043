//! Repository Gateway
//!
//! Answers "most popular repositories" queries by delegating to the GitHub
//! search API, with:
//! - Per-filter result caching with coalesced concurrent misses
//! - A count-based circuit breaker around upstream calls
//! - An empty-list fallback when the upstream is unavailable

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::CircuitBreaker;
use infrastructure::cache::CachedRepositoryProvider;
use infrastructure::github::GitHubClient;
use infrastructure::services::RepositoryService;
use tracing::info;

const REPOSITORY_BREAKER_NAME: &str = "repositories";

/// Wires client, cache, breaker and service from configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let client = GitHubClient::new(config.github.client_config())?;

    let cache = Arc::new(CachedRepositoryProvider::new(
        Arc::new(client),
        config.cache.cache_config(),
    ));

    let breaker = Arc::new(CircuitBreaker::new(
        REPOSITORY_BREAKER_NAME,
        config.circuit_breaker.breaker_config(),
    )?);

    let service = RepositoryService::new(cache.clone(), breaker)
        .with_call_timeout(config.circuit_breaker.call_timeout());

    info!(
        upstream = %config.github.base_url,
        cache_capacity = config.cache.max_capacity,
        "Repository service initialized"
    );

    Ok(AppState::new(Arc::new(service), cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CircuitState;

    #[test]
    fn test_create_app_state_with_defaults() {
        let state = create_app_state_with_config(&AppConfig::default()).unwrap();

        assert_eq!(state.breaker.name(), REPOSITORY_BREAKER_NAME);
        assert_eq!(state.breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_invalid_breaker_config_is_rejected() {
        let mut config = AppConfig::default();
        config.circuit_breaker.sliding_window_size = 0;

        assert!(create_app_state_with_config(&config).is_err());
    }
}
