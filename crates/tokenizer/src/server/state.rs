//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::service::EncryptionService;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying the vault.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Tokenization and encryption operations over the service key.
    pub service: EncryptionService,
    /// Service name reported by `/health`.
    pub service_name: Arc<String>,
}

impl AppState {
    /// Create a new [`AppState`] around `service`.
    pub fn new(service: EncryptionService, service_name: String) -> Self {
        Self {
            service,
            service_name: Arc::new(service_name),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Creates an [`AppState`] with an empty vault and a fixed test key.
    fn default() -> Self {
        Self::new(
            EncryptionService::new("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"),
            "encryption-service".into(),
        )
    }
}
