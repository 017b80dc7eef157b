//! Token vault: in-memory mapping from token id to encrypted card record.
//!
//! # Lifecycle
//!
//! 1. [`TokenVault::tokenize_card`] derives the last four digits and the brand
//!    from the PAN, encrypts the PAN, and only then issues an id and stores the
//!    record. A failed encryption issues nothing.
//! 2. [`TokenVault::get_token`] returns the non-secret summary of a record.
//!    The PAN is never decrypted on this path.
//!
//! # Security invariants
//!
//! - The plaintext PAN is never stored, logged, or returned.
//! - Records are immutable once inserted; there is no update or delete.
//! - The vault is volatile and unbounded for the life of the process.

pub mod card;
pub mod store;

pub use store::{TokenId, TokenSummary, TokenVault, VaultError};
