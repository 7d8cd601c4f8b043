//! Upstream retrieval errors

use thiserror::Error;

/// Failure while retrieving repositories from the upstream search API
///
/// `Clone` so that every caller coalesced onto one cache miss receives the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Upstream request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Upstream response exceeds {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: usize },

    #[error("Upstream transport error: {message}")]
    Transport { message: String },

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },
}

impl UpstreamError {
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    pub fn payload_too_large(limit_bytes: usize) -> Self {
        Self::PayloadTooLarge { limit_bytes }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Short label used for log fields and metric tags
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}
