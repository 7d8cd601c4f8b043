//! Search command - one query, JSON on stdout

use chrono::NaiveDate;
use clap::Args;

use crate::api::types::{RepositoryQueryParams, RepositoryResponse};
use crate::config::AppConfig;
use crate::domain::DEFAULT_PAGE_SIZE;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Restrict to a programming language
    #[arg(long)]
    pub language: Option<String>,

    /// Only repositories created after this date (YYYY-MM-DD)
    #[arg(long)]
    pub created_since: Option<NaiveDate>,

    /// Number of repositories to return
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

impl SearchArgs {
    fn to_params(&self) -> RepositoryQueryParams {
        RepositoryQueryParams {
            language: self.language.clone(),
            created_on: self.created_since,
            size: self.size,
        }
    }
}

/// Runs one search; logging stays off so stdout carries only the JSON
pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let state = crate::create_app_state_with_config(&config)?;

    let filter = args.to_params().to_filter();
    let repositories: Vec<RepositoryResponse> = state
        .repository_service
        .find_most_popular(&filter)
        .await
        .into_iter()
        .map(RepositoryResponse::from)
        .collect();

    println!("{}", serde_json::to_string_pretty(&repositories)?);

    Ok(())
}
