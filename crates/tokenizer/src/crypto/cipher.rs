//! AES-256-GCM encryption and decryption of byte strings.
//!
//! Every call to [`encrypt`] draws a fresh 96-bit nonce from the OS CSPRNG, so
//! identical plaintexts never produce identical output. GCM nonce reuse under
//! one key breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::key::KEY_LEN;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The random source failed or the AEAD refused to seal.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Malformed input or authentication failure. The cause is not recorded.
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Encrypt `plaintext` and return `base64(nonce ‖ ciphertext ‖ tag)`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::EncryptionFailed`] if the OS random source fails or
/// the AEAD seal fails.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<String, CipherError> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|_| CipherError::EncryptionFailed)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::EncryptionFailed)?;

    let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&sealed);
    Ok(STANDARD.encode(out))
}

/// Decrypt a value produced by [`encrypt`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::DecryptionFailed`] if the input is not valid base64,
/// is shorter than a nonce and tag, or fails authentication.
pub fn decrypt(key: &[u8], encoded: &str) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;

    let data = STANDARD
        .decode(encoded)
        .map_err(|_| CipherError::DecryptionFailed)?;
    if data.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::DecryptionFailed);
    }

    let (nonce_bytes, sealed) = data.split_at(NONCE_LEN);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed)
        .map_err(|_| CipherError::DecryptionFailed)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::normalize;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let encrypted = encrypt(&key, b"4111111111111111").unwrap();
        let decrypted = decrypt(&key, &encrypted).unwrap();
        assert_eq!(decrypted, b"4111111111111111");
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = random_key();
        let encrypted = encrypt(&key, b"").unwrap();
        assert!(decrypt(&key, &encrypted).unwrap().is_empty());
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let key = random_key();
        let a = encrypt(&key, b"same input").unwrap();
        let b = encrypt(&key, b"same input").unwrap();
        assert_ne!(a, b);
        assert_eq!(decrypt(&key, &a).unwrap(), b"same input");
        assert_eq!(decrypt(&key, &b).unwrap(), b"same input");
    }

    #[test]
    fn output_layout_is_nonce_ciphertext_tag() {
        let key = random_key();
        let encrypted = encrypt(&key, b"hello").unwrap();
        let raw = STANDARD.decode(encrypted).unwrap();
        assert_eq!(raw.len(), NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let encrypted = encrypt(&random_key(), b"secret").unwrap();
        assert_eq!(
            decrypt(&random_key(), &encrypted),
            Err(CipherError::DecryptionFailed)
        );
    }

    #[test]
    fn invalid_key_length_rejected() {
        let short_key = vec![0u8; 16];
        assert_eq!(encrypt(&short_key, b"x"), Err(CipherError::InvalidKeyLength));
        assert_eq!(decrypt(&short_key, "AAAA"), Err(CipherError::InvalidKeyLength));
    }

    #[test]
    fn every_flipped_byte_fails_auth() {
        let key = random_key();
        let raw = STANDARD.decode(encrypt(&key, b"tamper me").unwrap()).unwrap();
        for i in 0..raw.len() {
            let mut tampered = raw.clone();
            tampered[i] ^= 0x01;
            assert_eq!(
                decrypt(&key, &STANDARD.encode(&tampered)),
                Err(CipherError::DecryptionFailed),
                "byte {i} flipped but decryption succeeded"
            );
        }
    }

    #[test]
    fn malformed_inputs_share_one_error() {
        let key = random_key();
        let too_short = STANDARD.encode([0u8; NONCE_LEN + TAG_LEN - 1]);
        for input in ["", "!!!not base64!!!", too_short.as_str()] {
            assert_eq!(decrypt(&key, input), Err(CipherError::DecryptionFailed));
        }
    }

    #[test]
    fn normalized_keys_are_usable() {
        let raw = normalize("sixteen-char-key");
        let hexed = normalize("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff");
        for key in [raw, hexed] {
            let encrypted = encrypt(key.as_bytes(), b"payload").unwrap();
            assert_eq!(decrypt(key.as_bytes(), &encrypted).unwrap(), b"payload");
        }
    }
}
