//! Cryptographic operations for CipherLog.
//!
//! - PBKDF2-HMAC-SHA256 key derivation ([`KeyDeriver`])
//! - AES-256-GCM envelope encoding ([`CipherCodec`], [`CipherEnvelope`])
//! - Injectable random source and primitives ([`CryptoProvider`])

pub mod codec;
pub mod envelope;
pub mod key;
pub mod provider;

pub use codec::CipherCodec;
pub use envelope::{CipherEnvelope, Generation, LEGACY_SALT};
pub use key::{DerivedKey, KeyDeriver, PBKDF2_ITERATIONS};
pub use provider::{CryptoProvider, SystemCrypto, KEY_LENGTH, NONCE_LENGTH, SALT_LENGTH};
