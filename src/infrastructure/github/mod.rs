//! GitHub search API integration

mod client;
mod convert;
mod types;

pub use client::{GitHubClient, GitHubClientConfig};
