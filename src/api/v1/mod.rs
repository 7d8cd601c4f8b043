//! Public v1 API endpoints

pub mod repositories;

use axum::{routing::get, Router};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/repositories", get(repositories::list_most_popular))
}
