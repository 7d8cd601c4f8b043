//! Circuit breaker configuration

use std::time::Duration;

use crate::domain::DomainError;

/// Configuration for a count-based circuit breaker
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Failure rate in percent at or above which the breaker opens
    pub failure_rate_threshold: f64,
    /// Number of most recent outcomes kept while closed
    pub sliding_window_size: u32,
    /// Outcomes required in the window before the failure rate is evaluated
    pub minimum_number_of_calls: u32,
    /// Cool-down before an open breaker admits trial calls
    pub wait_duration_in_open_state: Duration,
    /// Trial calls admitted while half-open
    pub permitted_calls_in_half_open_state: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50.0,
            sliding_window_size: 10,
            minimum_number_of_calls: 5,
            wait_duration_in_open_state: Duration::from_secs(30),
            permitted_calls_in_half_open_state: 1,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn with_failure_rate_threshold(mut self, percent: f64) -> Self {
        self.failure_rate_threshold = percent;
        self
    }

    pub fn with_sliding_window_size(mut self, size: u32) -> Self {
        self.sliding_window_size = size;
        self
    }

    pub fn with_minimum_number_of_calls(mut self, calls: u32) -> Self {
        self.minimum_number_of_calls = calls;
        self
    }

    pub fn with_wait_duration_in_open_state(mut self, wait: Duration) -> Self {
        self.wait_duration_in_open_state = wait;
        self
    }

    pub fn with_permitted_calls_in_half_open_state(mut self, calls: u32) -> Self {
        self.permitted_calls_in_half_open_state = calls;
        self
    }

    /// Outcomes needed before the failure rate counts
    pub(crate) fn evaluation_threshold(&self) -> u32 {
        self.minimum_number_of_calls.min(self.sliding_window_size)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.failure_rate_threshold > 0.0 && self.failure_rate_threshold <= 100.0) {
            return Err(DomainError::configuration(format!(
                "failure_rate_threshold must be in (0, 100], got {}",
                self.failure_rate_threshold
            )));
        }

        if self.sliding_window_size == 0 {
            return Err(DomainError::configuration(
                "sliding_window_size must be at least 1",
            ));
        }

        if self.minimum_number_of_calls == 0 {
            return Err(DomainError::configuration(
                "minimum_number_of_calls must be at least 1",
            ));
        }

        if self.permitted_calls_in_half_open_state == 0 {
            return Err(DomainError::configuration(
                "permitted_calls_in_half_open_state must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CircuitBreakerConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.permitted_calls_in_half_open_state, 1);
        assert_eq!(config.wait_duration_in_open_state, Duration::from_secs(30));
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(CircuitBreakerConfig::default()
            .with_failure_rate_threshold(0.0)
            .validate()
            .is_err());
        assert!(CircuitBreakerConfig::default()
            .with_failure_rate_threshold(100.5)
            .validate()
            .is_err());
        assert!(CircuitBreakerConfig::default()
            .with_failure_rate_threshold(100.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        assert!(CircuitBreakerConfig::default()
            .with_sliding_window_size(0)
            .validate()
            .is_err());
        assert!(CircuitBreakerConfig::default()
            .with_minimum_number_of_calls(0)
            .validate()
            .is_err());
        assert!(CircuitBreakerConfig::default()
            .with_permitted_calls_in_half_open_state(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_evaluation_threshold_is_capped_by_window() {
        let config = CircuitBreakerConfig::default()
            .with_sliding_window_size(4)
            .with_minimum_number_of_calls(10);

        assert_eq!(config.evaluation_threshold(), 4);
    }
}
