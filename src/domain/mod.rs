//! Domain layer - Core business logic and entities

pub mod circuit_breaker;
pub mod error;
pub mod repository;

pub use circuit_breaker::{
    BreakerOpenError, CallPermit, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics,
    CircuitState,
};
pub use error::DomainError;
pub use repository::{
    build_query, query_clauses, RepositoryProvider, RepositoryRecord, RepositoryView,
    SearchFilter, UpstreamError, CLAUSE_SEPARATOR, DEFAULT_PAGE_SIZE,
};

#[cfg(test)]
pub use repository::MockRepositoryProvider;
