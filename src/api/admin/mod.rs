//! Operator endpoints for the breaker and the result cache

pub mod cache;
pub mod circuit_breaker;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/circuit-breaker", get(circuit_breaker::get_circuit_breaker))
        .route(
            "/circuit-breaker/reset",
            post(circuit_breaker::reset_circuit_breaker),
        )
        .route("/cache", delete(cache::clear_cache))
}
