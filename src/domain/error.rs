use thiserror::Error;

/// Errors raised while assembling the application
///
/// The retrieval path has its own error type, see
/// [`crate::domain::repository::UpstreamError`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
