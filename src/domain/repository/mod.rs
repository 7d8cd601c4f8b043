//! Repository search domain - filters, records and the provider seam

mod error;
mod filter;
mod provider;
mod query;
mod record;

pub use error::UpstreamError;
pub use filter::{SearchFilter, DEFAULT_PAGE_SIZE};
pub use provider::RepositoryProvider;
pub use query::{build_query, query_clauses, CLAUSE_SEPARATOR};
pub use record::{RepositoryRecord, RepositoryView};

#[cfg(test)]
pub use provider::MockRepositoryProvider;
