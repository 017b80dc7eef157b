//! Request and response types exchanged over the public HTTP API.
//!
//! Field names follow the snake_case JSON contract existing clients use.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Tokenization endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /tokenize/card`.
///
/// Only `pan` is encrypted and stored. `cvv` and `reference` are accepted for
/// compatibility and never persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenizeCardRequest {
    /// Primary account number.
    pub pan: String,
    /// Expiry month (1–12). Not validated.
    #[serde(default)]
    pub exp_month: u32,
    /// Expiry year. Not validated.
    #[serde(default)]
    pub exp_year: u32,
    /// Card verification value. Accepted as a JSON string or number; a
    /// string keeps its leading zeros.
    #[serde(default, deserialize_with = "string_or_number")]
    pub cvv: String,
    /// Caller-supplied reference. Accepted as a JSON string or number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub reference: String,
}

/// Older clients send `cvv` and `reference` as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Unsigned(n) => n.to_string(),
        StringOrNumber::Signed(n) => n.to_string(),
    })
}

impl fmt::Debug for TokenizeCardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizeCardRequest")
            .field("pan", &"[REDACTED]")
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvv", &"[REDACTED]")
            .field("reference", &self.reference)
            .finish()
    }
}

/// Response body for `POST /tokenize/card` and `GET /tokens/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque token identifier.
    pub token_id: u64,
    /// Last four digits of the PAN.
    pub last4: String,
    /// Detected card brand (`visa`, `mastercard`, `amex`, `discover`, `unknown`).
    pub brand: String,
}

// ---------------------------------------------------------------------------
// Generic encrypt / decrypt endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptDataRequest {
    /// Plaintext to encrypt.
    #[serde(default)]
    pub data: String,
}

impl fmt::Debug for EncryptDataRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptDataRequest { data: [REDACTED] }")
    }
}

/// Response body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptDataResponse {
    /// `base64(nonce ‖ ciphertext ‖ tag)`.
    pub encrypted_data: String,
}

/// Request body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptDataRequest {
    /// Value previously returned by `POST /encrypt`.
    #[serde(default)]
    pub encrypted_data: String,
}

/// Response body for `POST /decrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecryptDataResponse {
    /// Recovered plaintext.
    pub data: String,
}

impl fmt::Debug for DecryptDataResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptDataResponse { data: [REDACTED] }")
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.public_message())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status. Always `"ok"` while the process is serving.
    pub status: String,
    /// Configured service name.
    pub service: String,
    /// Number of tokens currently held in the vault.
    pub tokens_issued: usize,
}
