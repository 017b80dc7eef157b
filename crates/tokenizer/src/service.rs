//! [`EncryptionService`]: the four operations exposed to the HTTP layer.
//!
//! Tokenization goes through the [`TokenVault`]; generic encrypt/decrypt go
//! straight to the cipher with the same key and never touch the vault.

use std::sync::Arc;

use common::{protocol::TokenResponse, ServiceError};
use tracing::warn;

use crate::crypto::{self, CipherError, SymmetricKey};
use crate::vault::{TokenId, TokenSummary, TokenVault, VaultError};

/// Card tokenization and generic encryption over one service key.
///
/// Cheap to clone; clones share the key and the vault.
#[derive(Clone, Debug)]
pub struct EncryptionService {
    key: Arc<SymmetricKey>,
    vault: TokenVault,
}

impl EncryptionService {
    /// Build a service from the configured secret.
    ///
    /// The secret is normalised once here and held for the life of the service.
    pub fn new(secret: &str) -> Self {
        let key = Arc::new(crypto::normalize(secret));
        Self {
            vault: TokenVault::new(key.clone()),
            key,
        }
    }

    /// Tokenize a card and return its non-secret summary.
    ///
    /// Only the PAN is encrypted and stored. The expiry, CVV, and reference
    /// are accepted but discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EncryptionFailed`] or
    /// [`ServiceError::Configuration`] if the PAN could not be encrypted.
    pub fn tokenize_card(
        &self,
        pan: &str,
        _exp_month: u32,
        _exp_year: u32,
        _cvv: &str,
        _reference: &str,
    ) -> Result<TokenSummary, ServiceError> {
        self.vault.tokenize_card(pan).map_err(|e| {
            warn!(error = %e, "tokenization failed");
            e.into()
        })
    }

    /// Return the summary for a previously issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an id that was never issued.
    pub fn get_token(&self, id: TokenId) -> Result<TokenSummary, ServiceError> {
        Ok(self.vault.get_token(id)?)
    }

    /// Encrypt an arbitrary string with the service key.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EncryptionFailed`] if the cipher fails.
    pub fn encrypt_data(&self, plaintext: &str) -> Result<String, ServiceError> {
        crypto::encrypt(self.key.as_bytes(), plaintext.as_bytes()).map_err(|e| {
            warn!(error = %e, "encryption failed");
            e.into()
        })
    }

    /// Decrypt a value produced by [`EncryptionService::encrypt_data`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DecryptionFailed`] if the input is malformed,
    /// fails authentication, or does not decrypt to UTF-8.
    pub fn decrypt_data(&self, encoded: &str) -> Result<String, ServiceError> {
        let plaintext = crypto::decrypt(self.key.as_bytes(), encoded)?;
        String::from_utf8(plaintext).map_err(|_| ServiceError::DecryptionFailed)
    }

    /// Number of tokens currently held in the vault.
    pub fn tokens_issued(&self) -> usize {
        self.vault.len()
    }
}

impl From<CipherError> for ServiceError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::InvalidKeyLength => ServiceError::Configuration(err.to_string()),
            CipherError::EncryptionFailed => ServiceError::EncryptionFailed,
            CipherError::DecryptionFailed => ServiceError::DecryptionFailed,
        }
    }
}

impl From<VaultError> for ServiceError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::NotFound(id) => ServiceError::NotFound(id),
            VaultError::Cipher(e) => e.into(),
        }
    }
}

impl From<TokenSummary> for TokenResponse {
    fn from(summary: TokenSummary) -> Self {
        Self {
            token_id: summary.token_id,
            last4: summary.last4,
            brand: summary.brand.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::card::CardBrand;

    const HEX_SECRET: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn tokenize_then_get_round_trip() {
        let svc = EncryptionService::new(HEX_SECRET);
        let issued = svc
            .tokenize_card("5500000000000004", 12, 2030, "123", "order-1")
            .unwrap();
        assert_eq!(issued.brand, CardBrand::Mastercard);
        assert_eq!(issued.last4, "0004");
        assert_eq!(svc.get_token(issued.token_id).unwrap(), issued);
        assert_eq!(svc.tokens_issued(), 1);
    }

    #[test]
    fn get_unknown_token_is_not_found() {
        let svc = EncryptionService::new(HEX_SECRET);
        assert!(matches!(svc.get_token(999), Err(ServiceError::NotFound(999))));
    }

    #[test]
    fn encrypt_decrypt_data_round_trip() {
        for secret in ["sixteen-char-key", HEX_SECRET] {
            let svc = EncryptionService::new(secret);
            let encrypted = svc.encrypt_data("hello, world").unwrap();
            assert_eq!(svc.decrypt_data(&encrypted).unwrap(), "hello, world");
        }
    }

    #[test]
    fn decrypt_with_other_key_fails_generically() {
        let a = EncryptionService::new("key-a");
        let b = EncryptionService::new("key-b");
        let encrypted = a.encrypt_data("payload").unwrap();
        assert!(matches!(
            b.decrypt_data(&encrypted),
            Err(ServiceError::DecryptionFailed)
        ));
        assert!(matches!(
            b.decrypt_data("garbage"),
            Err(ServiceError::DecryptionFailed)
        ));
    }

    #[test]
    fn generic_encryption_does_not_touch_vault() {
        let svc = EncryptionService::new(HEX_SECRET);
        svc.encrypt_data("4111111111111111").unwrap();
        assert_eq!(svc.tokens_issued(), 0);
    }

    #[test]
    fn clones_share_the_vault() {
        let svc = EncryptionService::new(HEX_SECRET);
        let clone = svc.clone();
        let issued = svc
            .tokenize_card("4111111111111111", 1, 2031, "000", "")
            .unwrap();
        assert!(clone.get_token(issued.token_id).is_ok());
    }

    #[test]
    fn cipher_errors_map_to_taxonomy() {
        assert!(matches!(
            ServiceError::from(CipherError::InvalidKeyLength),
            ServiceError::Configuration(_)
        ));
        assert!(matches!(
            ServiceError::from(CipherError::EncryptionFailed),
            ServiceError::EncryptionFailed
        ));
        assert!(matches!(
            ServiceError::from(VaultError::Cipher(CipherError::DecryptionFailed)),
            ServiceError::DecryptionFailed
        ));
    }

    #[test]
    fn token_response_has_no_secret_fields() {
        let svc = EncryptionService::new(HEX_SECRET);
        let issued = svc
            .tokenize_card("4111111111111111", 1, 2031, "123", "ref")
            .unwrap();
        let json = serde_json::to_string(&TokenResponse::from(issued)).unwrap();
        assert!(!json.contains("4111111111111111"));
        assert!(json.contains("\"last4\":\"1111\""));
        assert!(json.contains("\"brand\":\"visa\""));
    }
}
