//! Core error types for taskdesk-core.
//!
//! Journal operations are total and never produce these; they surface from
//! configuration, the messaging forwarders and report input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskdesk-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Messaging forwarder errors
    #[error("Forward error: {0}")]
    Forward(#[from] ForwardError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised while forwarding a request to a messaging API.
///
/// An upstream non-success status is not an error: it is relayed to the
/// caller as-is.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// No credential configured for the service
    #[error("{service} credential is not configured")]
    MissingCredential { service: &'static str },

    /// Caller supplied something that cannot be forwarded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or client failure before an upstream status was received
    #[error("Request to {service} failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty value where one is required
    #[error("'{0}' must not be empty")]
    Empty(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
