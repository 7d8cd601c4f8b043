//! Health check endpoints for Kubernetes probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;
use crate::domain::CircuitState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Returns 200 while the process is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness with the upstream circuit state
///
/// An open breaker reports `degraded` but still answers 200: requests are
/// served from the empty fallback rather than refused.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let breaker_check = check_breaker(&state);
    let response = HealthResponse {
        status: breaker_check.status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![breaker_check]),
    };

    (StatusCode::OK, Json(response))
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn check_breaker(state: &AppState) -> HealthCheck {
    let circuit = state.breaker.state();

    let status = match circuit {
        CircuitState::Open => HealthStatus::Degraded,
        CircuitState::Closed | CircuitState::HalfOpen => HealthStatus::Healthy,
    };

    HealthCheck {
        name: format!("circuit_breaker:{}", state.breaker.name()),
        status,
        message: (circuit != CircuitState::Closed).then(|| format!("circuit is {}", circuit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_omits_empty_checks() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
            checks: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(!json.contains("checks"));
    }
}
