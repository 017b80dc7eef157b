//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailed`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::EncryptionFailed`] → 500
/// - [`ServiceError::Configuration`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed — invalid JSON, empty field, or non-numeric token id.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No record exists for the requested token id.
    #[error("token {0} not found")]
    NotFound(u64),

    /// Encryption failed (random source or cipher failure).
    #[error("encryption failed")]
    EncryptionFailed,

    /// Decryption failed. Malformed input and authentication failure are
    /// deliberately reported the same way.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The key material could not be used to set up the cipher.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailed => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::EncryptionFailed => 500,
            ServiceError::Configuration(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable error code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::EncryptionFailed => "encryption_failed",
            ServiceError::DecryptionFailed => "decryption_failed",
            ServiceError::Configuration(_) | ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Message that is safe to return to callers.
    ///
    /// Internal and configuration details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Configuration(_) | ServiceError::Internal(_) => {
                "internal server error".into()
            }
            other => other.to_string(),
        }
    }
}
