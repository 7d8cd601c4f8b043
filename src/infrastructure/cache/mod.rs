//! Cache layer for repository search results

mod cached_provider;

pub use cached_provider::{CachedRepositoryProvider, RepositoryCacheConfig};
