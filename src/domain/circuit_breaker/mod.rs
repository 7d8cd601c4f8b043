//! Circuit breaker domain - guards calls to a failing dependency

mod breaker;
mod config;

pub use breaker::{
    BreakerOpenError, CallPermit, CircuitBreaker, CircuitBreakerMetrics, CircuitState,
};
pub use config::CircuitBreakerConfig;
