use std::time::Duration;

use serde::Deserialize;

use crate::domain::CircuitBreakerConfig;
use crate::infrastructure::github::GitHubClientConfig;
use crate::infrastructure::cache::RepositoryCacheConfig;

/// Application configuration
///
/// Layered from `config/default`, `config/local` and `APP__`-prefixed
/// environment variables, e.g. `APP__GITHUB__TOKEN`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Upstream search API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_response_bytes: usize,
    pub token: Option<String>,
    pub user_agent: String,
}

/// Result cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub max_capacity: u64,
    /// `0` keeps entries until evicted by capacity
    pub ttl_secs: u64,
    pub time_to_idle_secs: Option<u64>,
}

/// Circuit breaker and caller-side timeout settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerSettings {
    pub failure_rate_threshold: f64,
    pub sliding_window_size: u32,
    pub minimum_number_of_calls: u32,
    pub wait_duration_in_open_state_secs: u64,
    pub permitted_calls_in_half_open_state: u32,
    /// Bound on one guarded call including cache lookup; absent disables it
    pub call_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    pub tracing: TracingSettings,
    pub metrics: MetricsSettings,
}

/// OTLP span export; off unless a collector is configured
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingSettings {
    pub enabled: bool,
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Clamped to `0.0..=1.0`
    pub sampling_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub enabled: bool,
    /// Route the Prometheus scrape endpoint is merged at
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        let client = GitHubClientConfig::default();

        Self {
            base_url: client.base_url,
            timeout_ms: client.timeout.as_millis() as u64,
            max_response_bytes: client.max_response_bytes,
            token: None,
            user_agent: client.user_agent,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            ttl_secs: 300,
            time_to_idle_secs: None,
        }
    }
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        let breaker = CircuitBreakerConfig::default();

        Self {
            failure_rate_threshold: breaker.failure_rate_threshold,
            sliding_window_size: breaker.sliding_window_size,
            minimum_number_of_calls: breaker.minimum_number_of_calls,
            wait_duration_in_open_state_secs: breaker.wait_duration_in_open_state.as_secs(),
            permitted_calls_in_half_open_state: breaker.permitted_calls_in_half_open_state,
            call_timeout_ms: None,
        }
    }
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: env!("CARGO_PKG_NAME").to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl GitHubSettings {
    pub fn client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            max_response_bytes: self.max_response_bytes,
            token: self.token.clone().filter(|t| !t.is_empty()),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl CacheSettings {
    pub fn cache_config(&self) -> RepositoryCacheConfig {
        RepositoryCacheConfig {
            max_capacity: self.max_capacity,
            ttl: (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs)),
            time_to_idle: self.time_to_idle_secs.map(Duration::from_secs),
        }
    }
}

impl CircuitBreakerSettings {
    pub fn breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_rate_threshold: self.failure_rate_threshold,
            sliding_window_size: self.sliding_window_size,
            minimum_number_of_calls: self.minimum_number_of_calls,
            wait_duration_in_open_state: Duration::from_secs(self.wait_duration_in_open_state_secs),
            permitted_calls_in_half_open_state: self.permitted_calls_in_half_open_state,
        }
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_without_files() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.github.base_url, "https://api.github.com/search");
        assert_eq!(config.github.timeout_ms, 5000);
        assert_eq!(config.github.max_response_bytes, 16 * 1024 * 1024);
        assert!(config.circuit_breaker.call_timeout().is_none());
        assert!(config.circuit_breaker.breaker_config().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_means_unbounded() {
        let settings = CacheSettings {
            ttl_secs: 0,
            ..CacheSettings::default()
        };

        assert!(settings.cache_config().ttl.is_none());
        assert_eq!(
            CacheSettings::default().cache_config().ttl,
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let settings = GitHubSettings {
            token: Some(String::new()),
            ..GitHubSettings::default()
        };

        assert!(settings.client_config().token.is_none());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [github]
                timeout_ms = 1500

                [circuit_breaker]
                sliding_window_size = 4
                call_timeout_ms = 2000

                [logging]
                level = "debug"
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.github.timeout_ms, 1500);
        assert_eq!(config.github.max_response_bytes, 16 * 1024 * 1024);
        assert_eq!(config.circuit_breaker.sliding_window_size, 4);
        assert_eq!(config.circuit_breaker.minimum_number_of_calls, 5);
        assert_eq!(
            config.circuit_breaker.call_timeout(),
            Some(Duration::from_millis(2000))
        );
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_observability_defaults_and_overrides() {
        let defaults = AppConfig::default().observability;
        assert!(!defaults.tracing.enabled);
        assert_eq!(defaults.tracing.service_name, "repo-gateway");
        assert!(defaults.metrics.enabled);
        assert_eq!(defaults.metrics.path, "/metrics");

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [observability.tracing]
                enabled = true
                sampling_ratio = 0.1

                [observability.metrics]
                path = "/internal/metrics"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.observability.tracing.enabled);
        assert_eq!(config.observability.tracing.sampling_ratio, 0.1);
        assert_eq!(config.observability.tracing.otlp_endpoint, "http://localhost:4317");
        assert!(config.observability.metrics.enabled);
        assert_eq!(config.observability.metrics.path, "/internal/metrics");
    }
}
