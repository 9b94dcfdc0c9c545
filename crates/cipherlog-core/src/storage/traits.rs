//! Post store trait definition.
//!
//! The `PostStore` trait defines the interface every storage backend
//! implements. The store persists `content` verbatim and never looks inside
//! it; encryption happens before a post reaches the store.

use std::path::Path;

use super::types::{NewPost, Post, PostFilter, PostSummary, StoreMetadata};
use crate::error::Result;

/// Storage interface for posts.
pub trait PostStore: Send + Sync {
    /// Create a new, empty store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CipherLogError::StoreExists` if the file already exists.
    fn create(path: &Path) -> Result<()>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `CipherLogError::StoreNotFound` if the file is missing, or
    /// `CipherLogError::Storage` if it is not a store of a supported version.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get store metadata and counts.
    fn metadata(&self) -> Result<StoreMetadata>;

    // --- Post operations ---

    /// Insert a post, replacing any existing post with the same slug.
    ///
    /// `created_at` is assigned by the store and is strictly greater than
    /// that of every post already present.
    ///
    /// # Errors
    ///
    /// Returns `CipherLogError::Validation` if the slug, title, or content
    /// size is invalid.
    fn save_post(&mut self, post: &NewPost) -> Result<Post>;

    /// Get a post by slug.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(post))` if found, `Ok(None)` if not found.
    fn get_post(&self, slug: &str) -> Result<Option<Post>>;

    /// List post summaries, newest first.
    fn list_posts(&self, filter: &PostFilter) -> Result<Vec<PostSummary>>;

    /// Delete a post. Returns `true` if a post was removed.
    fn delete_post(&mut self, slug: &str) -> Result<bool>;

    /// All encrypted posts with content, newest first.
    fn list_encrypted_posts(&self) -> Result<Vec<Post>>;

    // --- Maintenance operations ---

    /// Check store integrity.
    ///
    /// Verifies the database file, required metadata, and post flags.
    /// Post content is not parsed.
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent snapshot of the store to `dest`.
    fn backup_to(&self, dest: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_usable_as_bound() {
        fn _accepts_post_store<T: PostStore>(_store: T) {}
    }
}
