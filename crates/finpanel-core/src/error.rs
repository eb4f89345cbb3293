//! Error types for the Finpanel client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Finpanel library crates.
///
/// API failures carry no structured error code from the backend. Callers
/// only learn whether the request failed or the payload was malformed.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FinpanelError {
    /// The request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("Unexpected response status: {status}")]
    Status { status: u16 },

    /// The backend answered with a body of an unexpected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Required input was missing before a request was even built.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FinpanelError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// True when the backend answered but the payload made no sense.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FinpanelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FinpanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FinpanelError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FinpanelError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FinpanelError>`.
pub type Result<T> = std::result::Result<T, FinpanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_has_no_backend_detail() {
        let err = FinpanelError::Status { status: 500 };
        assert_eq!(err.to_string(), "Unexpected response status: 500");
        assert!(!err.is_invalid_response());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FinpanelError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion_is_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: FinpanelError = json_err.into();
        assert!(matches!(err, FinpanelError::Serialization { ref format, .. } if format == "JSON"));
    }
}
