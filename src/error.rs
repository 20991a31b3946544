//! Error Handling Module
//!
//! Errors returned by the `try_*` client methods. The lenient methods collapse
//! all of these into `false`, an empty list or `None`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_dev::error::ClientError;
//!
//! let error = ClientError::api_error(404, "model not found");
//! assert!(!error.is_transport());
//! ```

use thiserror::Error;

/// Errors produced while talking to the Ollama server
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete in time
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Any other transport-level failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// The response body was not the JSON shape we expected
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ClientError {
    /// Build an `ApiError`
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Whether the failure happened before a response was received
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::TimeoutError(_) | Self::HttpError(_)
        )
    }

    /// HTTP status code, when the server answered
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if let Some(status) = err.status() {
            Self::api_error(status.as_u16(), err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while installing the tracing subscriber
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Unknown log level, format or filter directive
    #[error("Invalid telemetry setting: {0}")]
    InvalidSetting(String),

    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    LogFile(#[from] std::io::Error),

    /// The subscriber could not be installed
    #[error("Telemetry initialization error: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api_error(404, "model 'x' not found");
        assert_eq!(err.to_string(), "API error 404: model 'x' not found");
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::ConnectionError("refused".into()).is_transport());
        assert!(ClientError::TimeoutError("5s".into()).is_transport());
        assert!(!ClientError::ParseError("eof".into()).is_transport());
        assert!(!ClientError::ConfigurationError("port".into()).is_transport());
    }

    #[test]
    fn test_from_serde_error() {
        let err: ClientError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
