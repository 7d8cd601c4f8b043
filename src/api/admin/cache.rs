use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::api::state::AppState;

/// DELETE /admin/cache
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    info!("Repository cache cleared by operator");

    StatusCode::NO_CONTENT
}
