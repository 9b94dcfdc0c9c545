//! Storage abstraction layer for CipherLog.
//!
//! This module defines the `PostStore` trait and its SQLite implementation.
//! The store treats post content as an opaque string.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqlitePostStore;
pub use traits::PostStore;
pub use types::{NewPost, Post, PostFilter, PostSummary, StoreMetadata};
