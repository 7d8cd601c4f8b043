//! Count-based circuit breaker

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::CircuitBreakerConfig;
use crate::domain::DomainError;

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half_open"),
        }
    }
}

/// Returned when the breaker does not admit a call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Circuit breaker '{name}' is {state} and does not permit further calls")]
pub struct BreakerOpenError {
    pub name: String,
    pub state: CircuitState,
}

/// Point-in-time view of the breaker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitBreakerMetrics {
    pub state: CircuitState,
    /// Outcomes currently held in the sliding window
    pub buffered_calls: u32,
    /// Failures currently held in the sliding window
    pub failed_calls: u32,
    /// Failure rate in percent, absent until enough calls are buffered
    pub failure_rate: Option<f64>,
    /// Calls rejected since the breaker was created
    pub not_permitted_calls: u64,
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    /// Bumped on every transition; outcomes of permits from older generations are ignored
    generation: u64,
    /// `true` marks a failure
    window: VecDeque<bool>,
    failed_calls: u32,
    opened_at: Option<Instant>,
    half_open_issued: u32,
    half_open_succeeded: u32,
    not_permitted_calls: u64,
}

impl BreakerInner {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            generation: 0,
            window: VecDeque::new(),
            failed_calls: 0,
            opened_at: None,
            half_open_issued: 0,
            half_open_succeeded: 0,
            not_permitted_calls: 0,
        }
    }

    fn failure_rate(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        f64::from(self.failed_calls) * 100.0 / self.window.len() as f64
    }
}

/// Circuit breaker guarding one operation
///
/// Every acquire, outcome and transition happens under a single lock, so
/// concurrent failures cannot flip the state twice or restart the cool-down
/// more than once.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerInner::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state, moving an expired open breaker to half-open
    pub fn state(&self) -> CircuitState {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        inner.state
    }

    pub fn metrics(&self) -> CircuitBreakerMetrics {
        let mut inner = self.lock();
        self.refresh(&mut inner);

        let buffered_calls = inner.window.len() as u32;
        let failure_rate = (buffered_calls >= self.config.evaluation_threshold())
            .then(|| inner.failure_rate());

        CircuitBreakerMetrics {
            state: inner.state,
            buffered_calls,
            failed_calls: inner.failed_calls,
            failure_rate,
            not_permitted_calls: inner.not_permitted_calls,
        }
    }

    /// Asks for permission to run one call
    ///
    /// The returned permit must be resolved with
    /// [`CallPermit::record_success`] or [`CallPermit::record_failure`].
    /// Dropping it unresolved counts as a failure.
    pub fn try_acquire(&self) -> Result<CallPermit<'_>, BreakerOpenError> {
        let mut inner = self.lock();
        self.refresh(&mut inner);

        let admitted = match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => false,
            CircuitState::HalfOpen => {
                if inner.half_open_issued < self.config.permitted_calls_in_half_open_state {
                    inner.half_open_issued += 1;
                    true
                } else {
                    false
                }
            }
        };

        if !admitted {
            inner.not_permitted_calls += 1;
            return Err(BreakerOpenError {
                name: self.name.clone(),
                state: inner.state,
            });
        }

        Ok(CallPermit {
            breaker: self,
            generation: inner.generation,
            resolved: false,
        })
    }

    /// Forces the breaker back to closed with an empty window
    pub fn reset(&self) {
        let mut inner = self.lock();
        self.transition(&mut inner, CircuitState::Closed);
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh(&self, inner: &mut BreakerInner) {
        if inner.state != CircuitState::Open {
            return;
        }

        let cooled_down = inner
            .opened_at
            .is_some_and(|at| at.elapsed() >= self.config.wait_duration_in_open_state);

        if cooled_down {
            self.transition(inner, CircuitState::HalfOpen);
        }
    }

    fn on_outcome(&self, generation: u64, failed: bool) {
        let mut inner = self.lock();

        if generation != inner.generation {
            debug!(
                breaker = %self.name,
                failed,
                "Ignoring outcome of a call admitted before the last transition"
            );
            return;
        }

        match inner.state {
            CircuitState::Closed => {
                if inner.window.len() as u32 >= self.config.sliding_window_size {
                    if let Some(true) = inner.window.pop_front() {
                        inner.failed_calls -= 1;
                    }
                }

                inner.window.push_back(failed);
                if failed {
                    inner.failed_calls += 1;
                }

                let buffered = inner.window.len() as u32;
                if buffered >= self.config.evaluation_threshold()
                    && inner.failure_rate() >= self.config.failure_rate_threshold
                {
                    warn!(
                        breaker = %self.name,
                        failure_rate = inner.failure_rate(),
                        threshold = self.config.failure_rate_threshold,
                        "Failure rate reached threshold"
                    );
                    self.transition(&mut inner, CircuitState::Open);
                }
            }
            CircuitState::HalfOpen => {
                if failed {
                    self.transition(&mut inner, CircuitState::Open);
                } else {
                    inner.half_open_succeeded += 1;

                    if inner.half_open_succeeded >= self.config.permitted_calls_in_half_open_state {
                        self.transition(&mut inner, CircuitState::Closed);
                    }
                }
            }
            CircuitState::Open => {}
        }
    }

    fn transition(&self, inner: &mut BreakerInner, to: CircuitState) {
        let from = inner.state;

        inner.state = to;
        inner.generation += 1;
        inner.half_open_issued = 0;
        inner.half_open_succeeded = 0;

        match to {
            CircuitState::Open => inner.opened_at = Some(Instant::now()),
            CircuitState::Closed => {
                inner.window.clear();
                inner.failed_calls = 0;
                inner.opened_at = None;
            }
            CircuitState::HalfOpen => {}
        }

        if from != to {
            info!(breaker = %self.name, from = %from, to = %to, "Circuit breaker transition");
            metrics::counter!(
                "circuit_breaker_transitions_total",
                "breaker" => self.name.clone(),
                "from" => from.to_string(),
                "to" => to.to_string()
            )
            .increment(1);
        }
    }
}

/// Permission to run one call through the breaker
#[must_use = "an unresolved permit is recorded as a failure when dropped"]
#[derive(Debug)]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    generation: u64,
    resolved: bool,
}

impl CallPermit<'_> {
    pub fn record_success(mut self) {
        self.resolved = true;
        self.breaker.on_outcome(self.generation, false);
    }

    pub fn record_failure(mut self) {
        self.resolved = true;
        self.breaker.on_outcome(self.generation, true);
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            debug!(breaker = %self.breaker.name, "Call abandoned before completion");
            self.breaker.on_outcome(self.generation, true);
        }
    }
}
