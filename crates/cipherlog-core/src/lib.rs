//! # CipherLog Core
//!
//! Core library for CipherLog - a small post store with optional
//! client-side encryption of individual posts.
//!
//! The store never sees a password or the plaintext of an encrypted post;
//! encryption and decryption happen in this crate, before content is saved
//! and after it is loaded.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation, AES-256-GCM envelopes, codec
//! - **content**: publish/read glue between codec and store
//! - **storage**: `PostStore` trait and the SQLite backend
//! - **fs**: atomic file replacement

pub mod content;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;

pub use content::{reveal_content, seal_content, SealedContent};
pub use crypto::{
    CipherCodec, CipherEnvelope, CryptoProvider, Generation, KeyDeriver, SystemCrypto,
};
pub use error::{CipherLogError, Result, UNLOCK_FAILED_MESSAGE};
pub use storage::{PostStore, SqlitePostStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
