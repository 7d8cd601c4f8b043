//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, CircuitBreakerSettings, GitHubSettings, LogFormat, LoggingConfig,
    MetricsSettings, ObservabilitySettings, ServerConfig, TracingSettings,
};
