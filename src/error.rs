//! Custom error types for iclr-downloader.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, DownloadError>` instead of using `unwrap()`.
//!
//! No error is caught or retried internally; every variant surfaces to the
//! caller unmodified and halts the run.

use thiserror::Error;

/// Main error type for iclr-downloader operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Configuration error (e.g. missing output directory)
    #[error("Config error: {0}")]
    Config(String),

    /// Credentials rejected by an OpenReview endpoint
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// No venue group exists for the requested year/venue
    #[error("Not found: {0}")]
    NotFound(String),

    /// A note's content lacks a field expected for its schema variant
    #[error("Schema mismatch: note {note} has no usable `{field}` field")]
    SchemaMismatch {
        /// Identifier of the offending note
        note: String,
        /// Name of the missing content field
        field: String,
    },

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Rate limited by the remote API (propagated, never retried)
    #[error("Rate limited by the remote API")]
    RateLimited {
        /// Seconds from the `Retry-After` header, when the API sent one
        retry_after: Option<u64>,
    },

    /// Remote API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: i32,
        /// Error message from API
        message: String,
    },

    /// URL or payload parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `DownloadError`
pub type Result<T> = std::result::Result<T, DownloadError>;
