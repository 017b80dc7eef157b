//! [`TokenVault`]: thread-safe store of encrypted card records.

use std::{collections::HashMap, fmt, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;

use super::card::{last4, CardBrand};
use crate::crypto::{cipher, CipherError, SymmetricKey};

/// Token identifier issued by the vault.
pub type TokenId = u64;

/// Ids at or below this value are never issued; the first token is `TOKEN_ID_FLOOR + 1`.
pub const TOKEN_ID_FLOOR: TokenId = 1000;

/// Errors produced by the vault layer.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No record exists for the requested id.
    #[error("token {0} not found")]
    NotFound(TokenId),

    /// Encrypting the PAN failed; no id was issued.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// A stored card record. Immutable once inserted.
#[derive(Clone)]
struct EncryptedRecord {
    // Never read back on the lookup path.
    #[allow(dead_code)]
    ciphertext: String,
    last4: String,
    brand: CardBrand,
    created_at: DateTime<Utc>,
}

impl fmt::Debug for EncryptedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedRecord")
            .field("last4", &self.last4)
            .field("brand", &self.brand)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// The non-secret view of a record returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSummary {
    pub token_id: TokenId,
    pub last4: String,
    pub brand: CardBrand,
}

#[derive(Debug)]
struct VaultInner {
    /// Last issued id. Only moves forward.
    counter: TokenId,
    records: HashMap<TokenId, EncryptedRecord>,
}

/// Thread-safe vault of encrypted card records.
///
/// Wraps an `Arc<RwLock<_>>` so that:
/// - Lookups take a shared read lock and run concurrently.
/// - Id issuance and insertion happen together under one write lock, so no
///   two callers can receive the same id.
///
/// The lock is synchronous; no operation here awaits or performs I/O.
#[derive(Clone, Debug)]
pub struct TokenVault {
    key: Arc<SymmetricKey>,
    inner: Arc<RwLock<VaultInner>>,
}

impl TokenVault {
    /// Create an empty vault that encrypts with `key`.
    pub fn new(key: Arc<SymmetricKey>) -> Self {
        Self {
            key,
            inner: Arc::new(RwLock::new(VaultInner {
                counter: TOKEN_ID_FLOOR,
                records: HashMap::new(),
            })),
        }
    }

    /// Encrypt and store `pan`, returning its newly issued token.
    ///
    /// The last four digits and brand are derived from `pan` before it is
    /// encrypted. Encryption runs outside the lock.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Cipher`] if encryption fails. In that case no id is
    /// issued and nothing is stored.
    pub fn tokenize_card(&self, pan: &str) -> Result<TokenSummary, VaultError> {
        let last4 = last4(pan);
        let brand = CardBrand::detect(pan);
        let ciphertext = cipher::encrypt(self.key.as_bytes(), pan.as_bytes())?;

        let token_id = {
            let mut inner = self.inner.write();
            inner.counter += 1;
            let id = inner.counter;
            inner.records.insert(
                id,
                EncryptedRecord {
                    ciphertext,
                    last4: last4.clone(),
                    brand,
                    created_at: Utc::now(),
                },
            );
            id
        };

        Ok(TokenSummary {
            token_id,
            last4,
            brand,
        })
    }

    /// Look up the summary for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotFound`] if `id` was never issued.
    pub fn get_token(&self, id: TokenId) -> Result<TokenSummary, VaultError> {
        let inner = self.inner.read();
        let record = inner.records.get(&id).ok_or(VaultError::NotFound(id))?;
        Ok(TokenSummary {
            token_id: id,
            last4: record.last4.clone(),
            brand: record.brand,
        })
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    #[cfg(test)]
    fn ciphertext_of(&self, id: TokenId) -> Option<String> {
        self.inner.read().records.get(&id).map(|r| r.ciphertext.clone())
    }
}
