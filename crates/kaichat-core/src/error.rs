//! Error types for the kaichat application.

use thiserror::Error;

/// A shared error type for the entire kaichat application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Startup configuration error (fatal, reported once by the binary)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote conversation call failure (caught and logged, never fatal)
    #[error("Remote service error: {0}")]
    Remote(String),

    /// The service returned a result whose shape cannot be classified
    #[error("Malformed search result: {0}")]
    MalformedResult(String),

    /// A second submission was attempted while a request was in flight
    #[error("A conversation request is already in flight")]
    RequestInFlight,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Creates a MalformedResult error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResult(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a remote call failure
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Check if this is a malformed-result error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResult(_))
    }

    /// Check if this is the in-flight guard error
    pub fn is_request_in_flight(&self) -> bool {
        matches!(self, Self::RequestInFlight)
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;
