//! HTTP API types

pub mod error;
pub mod query;
pub mod repository;

pub use error::ApiError;
pub use query::Query;
pub use repository::{RepositoryQueryParams, RepositoryResponse};
