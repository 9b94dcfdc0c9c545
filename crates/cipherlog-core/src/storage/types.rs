//! Core data types for the post store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a post store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "1")
    pub format_version: String,

    /// When this store was created
    pub created_at: DateTime<Utc>,

    /// Number of posts, encrypted or not
    pub post_count: u64,

    /// Number of posts flagged as encrypted
    pub encrypted_count: u64,
}

/// A stored post.
///
/// `content` is opaque to the store: plaintext prose when `is_encrypted` is
/// false, a serialized cipher envelope when it is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique, URL-safe identifier
    pub slug: String,

    /// Display title
    pub title: String,

    /// Body or serialized envelope
    pub content: String,

    /// Whether `content` is an envelope
    pub is_encrypted: bool,

    /// Insert/replace time, millisecond precision; sort key
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Listing projection of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            is_encrypted: self.is_encrypted,
            created_at: self.created_at,
        }
    }
}

/// Everything in a post except its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub is_encrypted: bool,
    pub created_at: DateTime<Utc>,
}

/// Builder for creating or replacing a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_encrypted: bool,
}

impl NewPost {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            content: content.into(),
            is_encrypted: false,
        }
    }

    pub fn with_encrypted(mut self, is_encrypted: bool) -> Self {
        self.is_encrypted = is_encrypted;
        self
    }
}

/// Filter for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Only encrypted (`Some(true)`) or only plain (`Some(false)`) posts
    pub encrypted: Option<bool>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = Some(encrypted);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
