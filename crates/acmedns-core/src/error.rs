//! Error types for acmedns
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for acmedns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for acmedns
#[derive(Error, Debug)]
pub enum Error {
    /// The record type is not one the provider can publish
    #[error("Unsupported record type: {0} (only TXT records are supported)")]
    UnsupportedRecordType(String),

    /// The record name is not an ACME challenge name
    #[error("Unsupported record name: {0} (only ACME challenge records are supported)")]
    UnsupportedRecordName(String),

    /// Request payload could not be encoded
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network-level failure talking to the provider
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with something other than success
    #[error("Provider {provider} rejected update: {status}")]
    UpstreamRejected {
        /// Provider name
        provider: String,
        /// HTTP status line, e.g. "500 Internal Server Error"
        status: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an unsupported record type error
    pub fn unsupported_type(record_type: impl Into<String>) -> Self {
        Self::UnsupportedRecordType(record_type.into())
    }

    /// Create an unsupported record name error
    pub fn unsupported_name(name: impl Into<String>) -> Self {
        Self::UnsupportedRecordName(name.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an upstream rejection error
    pub fn upstream_rejected(provider: impl Into<String>, status: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            provider: provider.into(),
            status: status.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the provider
    ///
    /// Validation errors are raised before any request leaves the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRecordType(_) | Self::UnsupportedRecordName(_)
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_rejected_includes_status_text() {
        let err = Error::upstream_rejected("myaddr", "403 Forbidden");
        assert_eq!(err.to_string(), "Provider myaddr rejected update: 403 Forbidden");
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::unsupported_type("A").is_validation());
        assert!(Error::unsupported_name("www.example.com").is_validation());
        assert!(!Error::transport("connection refused").is_validation());
        assert!(!Error::upstream_rejected("myaddr", "500 Internal Server Error").is_validation());
        assert!(!Error::config("missing key").is_validation());
    }

    #[test]
    fn test_from_anyhow() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }
}
