//! Cryptographic primitives behind an injectable capability.
//!
//! Key derivation and the codec never reach for a global random source or
//! cipher directly; they call through a [`CryptoProvider`] handed to them at
//! construction. Production code uses [`SystemCrypto`]; tests can swap in a
//! provider with scripted randomness to pin salts and nonces.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{CipherLogError, Result};

/// Symmetric key length in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// AEAD nonce length in bytes (96-bit GCM nonce).
pub const NONCE_LENGTH: usize = 12;

/// Per-entry salt length in bytes for newly written envelopes.
pub const SALT_LENGTH: usize = 16;

/// Random source, password hash, and AEAD cipher used by the codec.
///
/// Implementations must be safe to share across threads: concurrent
/// encryptions draw from the same provider.
pub trait CryptoProvider: Send + Sync {
    /// Fill `dest` with cryptographically secure random bytes.
    fn fill_random(&self, dest: &mut [u8]) -> Result<()>;

    /// PBKDF2-HMAC-SHA256 of `password` and `salt` into `out`.
    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8; KEY_LENGTH]);

    /// Encrypt `plaintext` with no associated data, returning ciphertext || tag.
    fn aead_seal(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Decrypt and authenticate ciphertext || tag.
    ///
    /// Any verification failure is reported as
    /// [`CipherLogError::Authentication`].
    fn aead_open(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// Provider backed by the OS CSPRNG, `pbkdf2`/`sha2`, and AES-256-GCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCrypto;

impl CryptoProvider for SystemCrypto {
    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CipherLogError::Crypto(format!("Random source unavailable: {}", e)))
    }

    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8; KEY_LENGTH]) {
        pbkdf2_hmac::<Sha256>(password, salt, rounds, out);
    }

    fn aead_seal(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| CipherLogError::Crypto(format!("Cipher init failed: {}", e)))?;
        cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|_| CipherLogError::Crypto("Encryption failed".to_string()))
    }

    fn aead_open(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| CipherLogError::Crypto(format!("Cipher init failed: {}", e)))?;
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map(Zeroizing::new)
            .map_err(|_| CipherLogError::Authentication)
    }
}

/// Provider whose random bytes come from a fixed script.
///
/// Hashing and AEAD delegate to [`SystemCrypto`]. Once the script runs out,
/// `fill_random` fails the way an unavailable entropy source would.
#[cfg(test)]
pub(crate) struct ScriptedCrypto {
    random: std::sync::Mutex<std::collections::VecDeque<u8>>,
}

#[cfg(test)]
impl ScriptedCrypto {
    pub(crate) fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            random: std::sync::Mutex::new(bytes.into_iter().collect()),
        }
    }
}

#[cfg(test)]
impl CryptoProvider for ScriptedCrypto {
    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        let mut random = self
            .random
            .lock()
            .map_err(|_| CipherLogError::Crypto("Random script poisoned".to_string()))?;
        if random.len() < dest.len() {
            return Err(CipherLogError::Crypto(
                "Random source unavailable: script exhausted".to_string(),
            ));
        }
        for byte in dest.iter_mut() {
            *byte = random.pop_front().unwrap_or_default();
        }
        Ok(())
    }

    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8; KEY_LENGTH]) {
        SystemCrypto.pbkdf2_sha256(password, salt, rounds, out)
    }

    fn aead_seal(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        SystemCrypto.aead_seal(key, nonce, plaintext)
    }

    fn aead_open(
        &self,
        key: &[u8; KEY_LENGTH],
        nonce: &[u8; NONCE_LENGTH],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        SystemCrypto.aead_open(key, nonce, ciphertext)
    }
}
