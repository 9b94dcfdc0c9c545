//! Post row types for database queries.

use chrono::{DateTime, Utc};

use crate::error::{CipherLogError, Result};
use crate::storage::types::{Post, PostSummary};

/// Raw row data from the posts table, before parsing into domain types.
#[derive(Debug)]
pub struct PostRow {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_encrypted: i64,
    pub created_at: i64,
}

impl PostRow {
    pub(crate) const COLUMNS: &'static str = "slug, title, content, is_encrypted, created_at";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            slug: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            is_encrypted: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

/// Raw row data for the list projection (no content column).
#[derive(Debug)]
pub struct SummaryRow {
    pub slug: String,
    pub title: String,
    pub is_encrypted: i64,
    pub created_at: i64,
}

impl SummaryRow {
    pub(crate) const COLUMNS: &'static str = "slug, title, is_encrypted, created_at";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            slug: row.get(0)?,
            title: row.get(1)?,
            is_encrypted: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

fn parse_flag(value: i64) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CipherLogError::Storage(format!(
            "Invalid is_encrypted value: {}",
            other
        ))),
    }
}

fn parse_timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CipherLogError::Storage(format!("Invalid timestamp: {}", millis)))
}

impl TryFrom<PostRow> for Post {
    type Error = CipherLogError;

    fn try_from(row: PostRow) -> Result<Self> {
        Ok(Post {
            is_encrypted: parse_flag(row.is_encrypted)?,
            created_at: parse_timestamp(row.created_at)?,
            slug: row.slug,
            title: row.title,
            content: row.content,
        })
    }
}

impl TryFrom<SummaryRow> for PostSummary {
    type Error = CipherLogError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        Ok(PostSummary {
            is_encrypted: parse_flag(row.is_encrypted)?,
            created_at: parse_timestamp(row.created_at)?,
            slug: row.slug,
            title: row.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = PostRow {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            content: "body".to_string(),
            is_encrypted: 1,
            created_at: 1_700_000_000_123,
        };
        let post = Post::try_from(row).unwrap();
        assert!(post.is_encrypted);
        assert_eq!(post.created_at.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_bad_flag_rejected() {
        let row = SummaryRow {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            is_encrypted: 2,
            created_at: 0,
        };
        assert!(matches!(
            PostSummary::try_from(row),
            Err(CipherLogError::Storage(_))
        ));
    }
}
