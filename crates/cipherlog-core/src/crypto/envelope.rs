//! Text serialization of encrypted content.
//!
//! An envelope is colon-separated standard base64 (with padding):
//!
//! - `salt:nonce:ciphertext` for everything written today.
//! - `nonce:ciphertext` for entries written before per-entry salts existed;
//!   their key is derived under [`LEGACY_SALT`].
//!
//! Ciphertext includes the 16-byte GCM tag. Any other segment count is a
//! format error.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use super::provider::NONCE_LENGTH;
use crate::error::{CipherLogError, Result};

/// Fixed salt for two-segment envelopes. Never used for new writes.
pub const LEGACY_SALT: &[u8] = b"CipherLogSalt";

const SEPARATOR: char = ':';

/// Which envelope layout an entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Two segments, fixed salt
    Legacy,
    /// Three segments, per-entry random salt
    Current,
}

impl Generation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherEnvelope {
    Legacy {
        nonce: [u8; NONCE_LENGTH],
        ciphertext: Vec<u8>,
    },
    Current {
        salt: Vec<u8>,
        nonce: [u8; NONCE_LENGTH],
        ciphertext: Vec<u8>,
    },
}

impl CipherEnvelope {
    /// Parse a serialized envelope.
    ///
    /// Fails with [`CipherLogError::Format`] on a segment count other than
    /// two or three, on invalid base64 in any segment, or on a nonce that is
    /// not exactly 12 bytes.
    pub fn parse(serialized: &str) -> Result<Self> {
        let segments: Vec<&str> = serialized.split(SEPARATOR).collect();
        match segments.as_slice() {
            [nonce, ciphertext] => Ok(Self::Legacy {
                nonce: decode_nonce(nonce)?,
                ciphertext: decode_segment("ciphertext", ciphertext)?,
            }),
            [salt, nonce, ciphertext] => Ok(Self::Current {
                salt: decode_segment("salt", salt)?,
                nonce: decode_nonce(nonce)?,
                ciphertext: decode_segment("ciphertext", ciphertext)?,
            }),
            other => Err(CipherLogError::Format(format!(
                "expected 2 or 3 segments, found {}",
                other.len()
            ))),
        }
    }

    pub fn generation(&self) -> Generation {
        match self {
            Self::Legacy { .. } => Generation::Legacy,
            Self::Current { .. } => Generation::Current,
        }
    }

    /// Salt the key must be derived under.
    pub fn salt(&self) -> &[u8] {
        match self {
            Self::Legacy { .. } => LEGACY_SALT,
            Self::Current { salt, .. } => salt,
        }
    }

    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        match self {
            Self::Legacy { nonce, .. } | Self::Current { nonce, .. } => nonce,
        }
    }

    pub fn ciphertext(&self) -> &[u8] {
        match self {
            Self::Legacy { ciphertext, .. } | Self::Current { ciphertext, .. } => ciphertext,
        }
    }
}

impl fmt::Display for CipherEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy { nonce, ciphertext } => write!(
                f,
                "{}:{}",
                STANDARD.encode(nonce),
                STANDARD.encode(ciphertext)
            ),
            Self::Current {
                salt,
                nonce,
                ciphertext,
            } => write!(
                f,
                "{}:{}:{}",
                STANDARD.encode(salt),
                STANDARD.encode(nonce),
                STANDARD.encode(ciphertext)
            ),
        }
    }
}

fn decode_segment(name: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|_| CipherLogError::Format(format!("invalid base64 in {} segment", name)))
}

fn decode_nonce(value: &str) -> Result<[u8; NONCE_LENGTH]> {
    let bytes = decode_segment("nonce", value)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        CipherLogError::Format(format!(
            "nonce must be {} bytes, found {}",
            NONCE_LENGTH, len
        ))
    })
}
