//! Domain error types
//!
//! This module defines the error hierarchy for Tabula. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Tabula error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TabulaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Repository-related errors (catalog or record fetching)
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Output file errors
    #[error("Write error: {0}")]
    Write(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TabulaError {
    /// Whether this error is a catalog outage.
    ///
    /// Per-cohort fetch failures are absorbed by the orchestrator and never
    /// reach callers as errors; of the errors that do escape, a catalog
    /// outage happens before any fetch and is called out separately so the
    /// CLI can report it as such.
    pub fn is_catalog_unavailable(&self) -> bool {
        matches!(
            self,
            TabulaError::Repository(RepositoryError::CatalogUnavailable(_))
        )
    }
}

/// Repository-specific errors
///
/// Errors that occur when interacting with the remote clinical data
/// repository. These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The project catalog cannot be reached; fatal to the whole run
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Failed to connect to the repository
    #[error("Failed to connect to repository: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TabulaError {
    fn from(err: std::io::Error) -> Self {
        TabulaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TabulaError {
    fn from(err: serde_json::Error) -> Self {
        TabulaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TabulaError {
    fn from(err: toml::de::Error) -> Self {
        TabulaError::Configuration(format!("TOML parse error: {err}"))
    }
}
