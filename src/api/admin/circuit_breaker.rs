//! Circuit breaker admin handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::api::state::AppState;
use crate::domain::CircuitBreakerMetrics;

#[derive(Debug, Serialize)]
pub struct CircuitBreakerResponse {
    pub name: String,
    #[serde(flatten)]
    pub metrics: CircuitBreakerMetrics,
    pub failure_rate_threshold: f64,
}

impl CircuitBreakerResponse {
    fn from_state(state: &AppState) -> Self {
        Self {
            name: state.breaker.name().to_string(),
            metrics: state.breaker.metrics(),
            failure_rate_threshold: state.breaker.config().failure_rate_threshold,
        }
    }
}

/// GET /admin/circuit-breaker
pub async fn get_circuit_breaker(State(state): State<AppState>) -> Json<CircuitBreakerResponse> {
    Json(CircuitBreakerResponse::from_state(&state))
}

/// POST /admin/circuit-breaker/reset
pub async fn reset_circuit_breaker(State(state): State<AppState>) -> Json<CircuitBreakerResponse> {
    state.breaker.reset();
    info!(breaker = state.breaker.name(), "Circuit breaker reset by operator");

    Json(CircuitBreakerResponse::from_state(&state))
}
