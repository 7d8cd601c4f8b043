//! CLI module for the repository gateway
//!
//! - `serve`: HTTP API server
//! - `search`: one-shot query printed as JSON

pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};

/// Repository Gateway - most popular repositories with caching and circuit breaking
#[derive(Parser)]
#[command(name = "repo-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Run a single search through the cache and breaker and print the result
    Search(search::SearchArgs),
}
