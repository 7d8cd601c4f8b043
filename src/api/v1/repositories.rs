//! Repositories endpoint handlers

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Query, RepositoryQueryParams, RepositoryResponse};

/// GET /v1/repositories
///
/// Upstream failures are absorbed by the service, so this only errors on
/// malformed query parameters.
pub async fn list_most_popular(
    State(state): State<AppState>,
    Query(params): Query<RepositoryQueryParams>,
) -> Result<Json<Vec<RepositoryResponse>>, ApiError> {
    let filter = params.to_filter();
    debug!(filter = ?filter, "Listing most popular repositories");

    let repositories = state
        .repository_service
        .find_most_popular(&filter)
        .await
        .into_iter()
        .map(RepositoryResponse::from)
        .collect();

    Ok(Json(repositories))
}
