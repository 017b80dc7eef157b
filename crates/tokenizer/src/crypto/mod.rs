//! AES-256-GCM encryption primitives and key normalisation.
//!
//! This module is intentionally free of HTTP and vault dependencies.
//! It provides the low-level encrypt/decrypt operations used by the vault and
//! by the generic `/encrypt` and `/decrypt` endpoints.
//!
//! # Ciphertext format
//!
//! ```text
//! base64-standard(nonce[12] ‖ ciphertext ‖ tag[16])
//! ```

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, CipherError};
pub use key::{normalize, SymmetricKey};
