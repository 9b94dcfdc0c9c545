//! Password-based encryption of post content.
//!
//! [`CipherCodec::encode`] always writes a three-segment envelope with a
//! fresh salt and nonce. [`CipherCodec::decode`] reads both envelope
//! generations. Both are CPU-bound (600k PBKDF2 rounds); the `_async`
//! variants move the work onto tokio's blocking pool.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::envelope::CipherEnvelope;
use super::key::KeyDeriver;
use super::provider::{CryptoProvider, SystemCrypto, NONCE_LENGTH, SALT_LENGTH};
use crate::error::{CipherLogError, Result};

/// Encrypts and decrypts text under a password.
pub struct CipherCodec<P = SystemCrypto> {
    provider: Arc<P>,
    deriver: KeyDeriver<P>,
}

impl<P> Clone for CipherCodec<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            deriver: self.deriver.clone(),
        }
    }
}

impl CipherCodec<SystemCrypto> {
    /// Codec backed by the operating system's CSPRNG.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemCrypto))
    }
}

impl Default for CipherCodec<SystemCrypto> {
    fn default() -> Self {
        Self::system()
    }
}

impl<P: CryptoProvider> CipherCodec<P> {
    pub fn new(provider: Arc<P>) -> Self {
        let deriver = KeyDeriver::new(Arc::clone(&provider));
        Self { provider, deriver }
    }

    #[cfg(test)]
    pub(crate) fn with_deriver(provider: Arc<P>, deriver: KeyDeriver<P>) -> Self {
        Self { provider, deriver }
    }

    /// Encrypt `plaintext` into a fresh current-generation envelope.
    pub fn seal(&self, plaintext: &str, password: &str) -> Result<CipherEnvelope> {
        let mut salt = vec![0u8; SALT_LENGTH];
        self.provider.fill_random(&mut salt)?;
        let mut nonce = [0u8; NONCE_LENGTH];
        self.provider.fill_random(&mut nonce)?;

        let key = self.deriver.derive(password, &salt);
        let ciphertext = self
            .provider
            .aead_seal(key.as_bytes(), &nonce, plaintext.as_bytes())?;

        Ok(CipherEnvelope::Current {
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Encrypt `plaintext` and serialize it as `salt:nonce:ciphertext`.
    ///
    /// Two calls with identical inputs produce different output.
    pub fn encode(&self, plaintext: &str, password: &str) -> Result<String> {
        Ok(self.seal(plaintext, password)?.to_string())
    }

    /// Decrypt a parsed envelope.
    ///
    /// Plaintext bytes that are not valid UTF-8 are decoded lossily.
    pub fn open(&self, envelope: &CipherEnvelope, password: &str) -> Result<String> {
        let key = self.deriver.derive(password, envelope.salt());
        let plaintext = self
            .provider
            .aead_open(key.as_bytes(), envelope.nonce(), envelope.ciphertext())?;
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }

    /// Parse and decrypt a serialized envelope of either generation.
    ///
    /// Malformed input fails with [`CipherLogError::Format`]; a wrong
    /// password or tampered bytes fail with
    /// [`CipherLogError::Authentication`].
    pub fn decode(&self, serialized: &str, password: &str) -> Result<String> {
        let result = CipherEnvelope::parse(serialized).and_then(|envelope| {
            debug!(generation = %envelope.generation(), "decoding envelope");
            self.open(&envelope, password)
        });

        if let Err(err) = &result {
            if let Some(kind) = err.unlock_failure_kind() {
                debug!(kind, "envelope decode failed");
            }
        }
        result
    }
}

impl<P: CryptoProvider + 'static> CipherCodec<P> {
    /// [`encode`](Self::encode) on the blocking pool.
    pub async fn encode_async(&self, plaintext: String, password: SecretString) -> Result<String> {
        let codec = self.clone();
        tokio::task::spawn_blocking(move || codec.encode(&plaintext, password.expose_secret()))
            .await
            .map_err(|e| CipherLogError::Crypto(format!("Encryption task failed: {}", e)))?
    }

    /// [`decode`](Self::decode) on the blocking pool.
    pub async fn decode_async(&self, serialized: String, password: SecretString) -> Result<String> {
        let codec = self.clone();
        tokio::task::spawn_blocking(move || codec.decode(&serialized, password.expose_secret()))
            .await
            .map_err(|e| CipherLogError::Crypto(format!("Decryption task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::envelope::{Generation, LEGACY_SALT};
    use crate::crypto::provider::ScriptedCrypto;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn fast_codec() -> CipherCodec<SystemCrypto> {
        let provider = Arc::new(SystemCrypto);
        let deriver = KeyDeriver::with_iterations(Arc::clone(&provider), 1);
        CipherCodec::with_deriver(provider, deriver)
    }

    fn scripted_codec(bytes: Vec<u8>) -> CipherCodec<ScriptedCrypto> {
        let provider = Arc::new(ScriptedCrypto::new(bytes));
        let deriver = KeyDeriver::with_iterations(Arc::clone(&provider), 1);
        CipherCodec::with_deriver(provider, deriver)
    }

    #[test]
    fn test_encode_decode() {
        let codec = fast_codec();
        let encoded = codec.encode("hello", "pw1").unwrap();
        assert_eq!(encoded.split(':').count(), 3);
        assert_eq!(codec.decode(&encoded, "pw1").unwrap(), "hello");
    }

    #[test]
    fn test_encode_segment_lengths() {
        let encoded = fast_codec().encode("hello", "pw1").unwrap();
        let segments: Vec<Vec<u8>> = encoded
            .split(':')
            .map(|s| STANDARD.decode(s).unwrap())
            .collect();
        assert_eq!(segments[0].len(), SALT_LENGTH);
        assert_eq!(segments[1].len(), NONCE_LENGTH);
        assert_eq!(segments[2].len(), "hello".len() + 16);
    }

    #[test]
    fn test_encode_empty_plaintext() {
        let codec = fast_codec();
        let encoded = codec.encode("", "pw1").unwrap();
        let ct = STANDARD.decode(encoded.split(':').nth(2).unwrap()).unwrap();
        assert_eq!(ct.len(), 16);
        assert_eq!(codec.decode(&encoded, "pw1").unwrap(), "");
    }

    #[test]
    fn test_scripted_randomness_pins_salt_and_nonce() {
        let mut script: Vec<u8> = (0..16).collect();
        script.extend(100..112);
        let codec = scripted_codec(script);

        let envelope = codec.seal("hello", "pw1").unwrap();
        assert_eq!(envelope.generation(), Generation::Current);
        assert_eq!(envelope.salt(), (0..16).collect::<Vec<u8>>().as_slice());
        assert_eq!(envelope.nonce().to_vec(), (100..112).collect::<Vec<u8>>());
    }

    #[test]
    fn test_encode_without_randomness_fails() {
        let codec = scripted_codec(vec![0u8; 4]);
        let result = codec.encode("hello", "pw1");
        assert!(matches!(result, Err(CipherLogError::Crypto(_))));
    }

    #[test]
    fn test_decode_legacy_envelope() {
        let codec = fast_codec();
        let nonce = [9u8; NONCE_LENGTH];
        let key = codec.deriver.derive("pw1", LEGACY_SALT);
        let ciphertext = SystemCrypto.aead_seal(key.as_bytes(), &nonce, b"old post").unwrap();
        let serialized = format!(
            "{}:{}",
            STANDARD.encode(nonce),
            STANDARD.encode(&ciphertext)
        );

        assert_eq!(codec.decode(&serialized, "pw1").unwrap(), "old post");
        assert!(matches!(
            codec.decode(&serialized, "pw2"),
            Err(CipherLogError::Authentication)
        ));
    }

    #[test]
    fn test_decode_wrong_password() {
        let codec = fast_codec();
        let encoded = codec.encode("hello", "pw1").unwrap();
        assert!(matches!(
            codec.decode(&encoded, "pw2"),
            Err(CipherLogError::Authentication)
        ));
    }

    #[test]
    fn test_decode_malformed_is_format_error() {
        let codec = fast_codec();
        for input in ["only-one-segment", "a:b:c:d", "!!:!!:!!"] {
            assert!(matches!(
                codec.decode(input, "pw1"),
                Err(CipherLogError::Format(_))
            ));
        }
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let codec = fast_codec();
        let salt = [3u8; SALT_LENGTH];
        let nonce = [4u8; NONCE_LENGTH];
        let key = codec.deriver.derive("pw1", &salt);
        let ciphertext = SystemCrypto
            .aead_seal(key.as_bytes(), &nonce, &[0x66, 0xff, 0x6f])
            .unwrap();
        let envelope = CipherEnvelope::Current {
            salt: salt.to_vec(),
            nonce,
            ciphertext,
        };

        assert_eq!(codec.open(&envelope, "pw1").unwrap(), "f\u{FFFD}o");
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let codec = fast_codec();
        let encoded = codec
            .encode_async("hello".to_string(), SecretString::from("pw1".to_string()))
            .await
            .unwrap();
        let decoded = codec
            .decode_async(encoded, SecretString::from("pw1".to_string()))
            .await
            .unwrap();
        assert_eq!(decoded, "hello");
    }
}
