//! Error types for CipherLog core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for CipherLog operations.
pub type Result<T> = std::result::Result<T, CipherLogError>;

/// Message shown to readers for any failed unlock attempt.
///
/// Format and authentication failures both map to this text so that the
/// surfaced message never reveals which one occurred.
pub const UNLOCK_FAILED_MESSAGE: &str = "Password incorrect.";

/// Core error type for CipherLog operations.
#[derive(Debug, Error)]
pub enum CipherLogError {
    /// Serialized envelope is malformed (segment count, base64, nonce length)
    #[error("Invalid format: {0}")]
    Format(String),

    /// AEAD tag verification failed (wrong password or tampered envelope)
    #[error("Authentication failed: decryption failed")]
    Authentication,

    /// Encrypting content for publication failed; nothing was stored
    #[error("Publish failed: {0}")]
    PublishFailed(String),

    /// Cryptographic primitive failure (random source, cipher setup)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Post store file not found
    #[error("Post store not found")]
    StoreNotFound,

    /// Post store file already exists
    #[error("Post store already exists")]
    StoreExists,

    /// Post not found by slug
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl CipherLogError {
    /// True when decoding an envelope failed, for either reason.
    pub fn is_unlock_failure(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Authentication)
    }

    /// Diagnostic label for an unlock failure, used in logs only.
    pub fn unlock_failure_kind(&self) -> Option<&'static str> {
        match self {
            Self::Format(_) => Some("format"),
            Self::Authentication => Some("authentication"),
            _ => None,
        }
    }

    /// Message safe to show an end user.
    ///
    /// Unlock failures collapse to [`UNLOCK_FAILED_MESSAGE`]; everything else
    /// uses its `Display` text.
    pub fn user_message(&self) -> String {
        if self.is_unlock_failure() {
            UNLOCK_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_failures_share_user_message() {
        let format = CipherLogError::Format("invalid format".to_string());
        let auth = CipherLogError::Authentication;

        assert_eq!(format.user_message(), auth.user_message());
        assert_eq!(auth.user_message(), UNLOCK_FAILED_MESSAGE);
    }

    #[test]
    fn test_unlock_failures_distinguishable_internally() {
        let format = CipherLogError::Format("invalid format".to_string());
        let auth = CipherLogError::Authentication;

        assert_eq!(format.unlock_failure_kind(), Some("format"));
        assert_eq!(auth.unlock_failure_kind(), Some("authentication"));
        assert_ne!(format.to_string(), auth.to_string());
    }

    #[test]
    fn test_other_errors_keep_display_text() {
        let err = CipherLogError::PostNotFound("hello".to_string());
        assert!(!err.is_unlock_failure());
        assert_eq!(err.user_message(), "Post not found: hello");
    }
}
