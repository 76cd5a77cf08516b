//! Error types for the folio intake pipeline and its client.
//!
//! All fallible operations return `FolioResult<T>`.  None of these errors is
//! fatal to a running server: the intake handler turns each one into a
//! well-formed response.

use thiserror::Error;

/// The unified error type for folio crates.
#[derive(Debug, Error)]
pub enum FolioError {
    /// The intake endpoint was called with a method other than `POST`.
    #[error("invalid request method '{method}'")]
    InvalidMethod { method: String },

    /// One or more form fields failed validation.
    #[error("validation failed for {count} field(s)")]
    ValidationFailed { count: usize },

    /// The message store could not append a record.
    ///
    /// The reason is for server logs only and never reaches the caller.
    #[error("message store write failed: {reason}")]
    StoreWriteFailed { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The network call to the intake endpoint produced no usable response.
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// The intake endpoint answered with a body that is not the response schema.
    #[error("malformed intake response: {reason}")]
    MalformedResponse { reason: String },

    /// The submission controller was driven through an illegal transition.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

/// Convenience alias used throughout the folio crates.
pub type FolioResult<T> = Result<T, FolioError>;
