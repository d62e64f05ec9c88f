//! Unified error types for TrustLens

use thiserror::Error;

/// Unified error type for all TrustLens operations
#[derive(Error, Debug)]
pub enum LensError {
    // Browser/CDP errors
    #[error("Browser error: {0}")]
    Browser(String),

    // Classifier transport errors
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Protocol failure (HTTP {status}): {body}")]
    Protocol { status: u16, body: String },

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl LensError {
    /// Whether this failure happened below the HTTP layer (timeout, abort,
    /// refused connection). Only these are eligible for endpoint failover.
    pub fn is_network(&self) -> bool {
        matches!(self, LensError::Network(_))
    }
}

/// Result type alias using LensError
pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(LensError::Network("timeout".to_string()).is_network());
        assert!(!LensError::Protocol {
            status: 503,
            body: "unavailable".to_string()
        }
        .is_network());
        assert!(!LensError::Other("boom".to_string()).is_network());
    }

    #[test]
    fn test_protocol_display_includes_status() {
        let err = LensError::Protocol {
            status: 422,
            body: "bad payload".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("bad payload"));
    }
}
