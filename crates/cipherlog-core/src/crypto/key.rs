//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! A password and a salt deterministically produce a 256-bit AES key. The
//! high iteration count makes each guess expensive; it is the only brake on
//! offline guessing against a stored envelope.

use std::sync::Arc;

use zeroize::ZeroizeOnDrop;

use super::provider::{CryptoProvider, SystemCrypto, KEY_LENGTH};

/// PBKDF2 iteration count. Changing it breaks every existing envelope.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// A symmetric key derived from a password.
///
/// Key bytes are zeroized when the value is dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Turns a password and salt into a [`DerivedKey`].
///
/// Empty passwords and salts of any length are accepted; policy about what
/// a usable password is lives with the caller.
pub struct KeyDeriver<P = SystemCrypto> {
    provider: Arc<P>,
    iterations: u32,
}

impl<P> Clone for KeyDeriver<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            iterations: self.iterations,
        }
    }
}

impl<P: CryptoProvider> KeyDeriver<P> {
    /// Deriver using the fixed production iteration count.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Deriver with a reduced iteration count, for fast unit tests only.
    #[cfg(test)]
    pub(crate) fn with_iterations(provider: Arc<P>, iterations: u32) -> Self {
        Self {
            provider,
            iterations,
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive the key for `password` under `salt`.
    ///
    /// Same inputs always yield the same key.
    pub fn derive(&self, password: &str, salt: &[u8]) -> DerivedKey {
        let mut key_bytes = [0u8; KEY_LENGTH];
        self.provider
            .pbkdf2_sha256(password.as_bytes(), salt, self.iterations, &mut key_bytes);
        DerivedKey::from_bytes(key_bytes)
    }
}

impl Default for KeyDeriver<SystemCrypto> {
    fn default() -> Self {
        Self::new(Arc::new(SystemCrypto))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::envelope::LEGACY_SALT;

    fn fast() -> KeyDeriver<SystemCrypto> {
        KeyDeriver::with_iterations(Arc::new(SystemCrypto), 1)
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let deriver = KeyDeriver::default();
        let salt = [0x11u8; 16];

        let key1 = deriver.derive("hunter2", &salt);
        let key2 = deriver.derive("hunter2", &salt);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_production_iteration_count() {
        assert_eq!(KeyDeriver::default().iterations(), 600_000);
    }

    #[test]
    fn test_known_answer_single_round() {
        let key = fast().derive("password", b"salt");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_different_salt_different_key() {
        let deriver = fast();
        let key1 = deriver.derive("hunter2", &[0x11u8; 16]);
        let key2 = deriver.derive("hunter2", &[0x12u8; 16]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let deriver = fast();
        let key1 = deriver.derive("hunter2", LEGACY_SALT);
        let key2 = deriver.derive("hunter3", LEGACY_SALT);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_accepted() {
        let key = fast().derive("", LEGACY_SALT);
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = fast().derive("hunter2", LEGACY_SALT);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&format!("{:?}", key.as_bytes())));
    }
}
