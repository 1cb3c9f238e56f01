//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Namecast
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NamecastError {
    /// The run cannot start with the current configuration (e.g. no fields
    /// selected).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller was rejected by the access-control check.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// The user or settings store failed to read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// Request input was malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure on the client side (timeouts included).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NamecastError {
    /// Error raised when a batch run starts without any selected fields.
    pub fn no_fields_selected() -> Self {
        Self::Configuration("no fields selected".into())
    }

    /// The message carried by the error, without its category prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Configuration(msg)
            | Self::Authorization(msg)
            | Self::Store(msg)
            | Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Network(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Result type alias for Namecast operations
pub type Result<T> = std::result::Result<T, NamecastError>;
