//! Common types, protocol definitions, and errors shared across the card tokenization crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
