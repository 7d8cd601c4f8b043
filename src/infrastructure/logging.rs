use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig, TracingSettings};
use crate::infrastructure::observability::init_tracing;

/// Installs the global subscriber
///
/// `RUST_LOG` overrides the configured level. OpenTelemetry export is
/// attached only when enabled; a failing exporter leaves plain logging in place.
pub fn init_logging(config: &LoggingConfig, tracing_config: &TracingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (otel_layer, otel_error) = if tracing_config.enabled {
        match init_tracing(tracing_config) {
            Ok(tracer) => (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                None,
            ),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(filter).with(otel_layer);

    match config.format {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);

    match otel_error {
        Some(e) => tracing::warn!("Failed to initialize OpenTelemetry: {}. Export disabled.", e),
        None if tracing_config.enabled => tracing::info!(
            "OpenTelemetry export to {}",
            tracing_config.otlp_endpoint
        ),
        None => {}
    }
}
