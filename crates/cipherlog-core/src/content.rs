//! Publish and read paths for post content.
//!
//! These functions sit between the codec and the store: [`seal_content`]
//! turns an author's plaintext into what gets stored, and
//! [`reveal_content`] turns a stored post back into readable text.

use tracing::debug;

use crate::crypto::{CipherCodec, CryptoProvider};
use crate::error::{CipherLogError, Result};
use crate::storage::types::{NewPost, Post};

/// Content ready to be stored, with its encryption flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedContent {
    pub content: String,
    pub is_encrypted: bool,
}

impl SealedContent {
    pub fn into_new_post(self, slug: impl Into<String>, title: impl Into<String>) -> NewPost {
        NewPost::new(slug, title, self.content).with_encrypted(self.is_encrypted)
    }
}

/// Prepare plaintext for storage.
///
/// With no password the text is stored as-is. With a password it is
/// encrypted into a fresh envelope; an empty password is rejected rather
/// than producing an entry flagged as encrypted that isn't.
///
/// # Errors
///
/// - `InvalidInput` for `Some("")`
/// - `PublishFailed` if encryption fails; no plaintext fallback is produced
pub fn seal_content<P: CryptoProvider>(
    codec: &CipherCodec<P>,
    plaintext: &str,
    password: Option<&str>,
) -> Result<SealedContent> {
    let Some(password) = password else {
        return Ok(SealedContent {
            content: plaintext.to_string(),
            is_encrypted: false,
        });
    };

    if password.is_empty() {
        return Err(CipherLogError::InvalidInput(
            "password required to encrypt".to_string(),
        ));
    }

    let content = codec
        .encode(plaintext, password)
        .map_err(|e| CipherLogError::PublishFailed(e.to_string()))?;
    Ok(SealedContent {
        content,
        is_encrypted: true,
    })
}

/// Recover readable text from a stored post.
///
/// Unencrypted posts are returned verbatim without touching the codec.
///
/// # Errors
///
/// - `InvalidInput` if the post is encrypted and no password was given
/// - `Format` or `Authentication` from the codec, unchanged
pub fn reveal_content<P: CryptoProvider>(
    codec: &CipherCodec<P>,
    post: &Post,
    password: Option<&str>,
) -> Result<String> {
    if !post.is_encrypted {
        return Ok(post.content.clone());
    }

    let password =
        password.ok_or_else(|| CipherLogError::InvalidInput("password required".to_string()))?;

    codec.decode(&post.content, password).inspect_err(|err| {
        if let Some(kind) = err.unlock_failure_kind() {
            debug!(slug = %post.slug, kind, "unlock failed");
        }
    })
}
