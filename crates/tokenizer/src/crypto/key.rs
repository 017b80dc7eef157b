//! [`SymmetricKey`]: the service key derived from the configured secret.

use std::fmt;

use zeroize::Zeroizing;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The bytes are wiped when the last copy is dropped and never appear in
/// `Debug` output.
#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<[u8; KEY_LEN]>);

impl SymmetricKey {
    /// Raw key bytes, for handing to the cipher layer only.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Normalise a configured secret into a [`SymmetricKey`].
///
/// The secret is hex-decoded when it is valid hex; otherwise its UTF-8 bytes
/// are used as-is. The material is then truncated or zero-padded to
/// [`KEY_LEN`] bytes. Never fails.
pub fn normalize(secret: &str) -> SymmetricKey {
    let material = Zeroizing::new(
        hex::decode(secret).unwrap_or_else(|_| secret.as_bytes().to_vec()),
    );

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    let n = material.len().min(KEY_LEN);
    key[..n].copy_from_slice(&material[..n]);
    SymmetricKey(key)
}
