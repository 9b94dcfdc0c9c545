//! SQLite storage backend.
//!
//! Posts live in an on-disk SQLite database. Writes go straight to the file;
//! there is no in-memory copy to flush.

mod row;
mod validation;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::{CipherLogError, Result};
use crate::storage::traits::PostStore;
use crate::storage::types::{NewPost, Post, PostFilter, PostSummary, StoreMetadata};

use row::{PostRow, SummaryRow};
pub use validation::{
    validate_content, validate_slug, validate_title, MAX_CONTENT_BYTES, MAX_SLUG_BYTES,
    MAX_TITLE_CHARS,
};

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "1";

/// SQLite-backed post store.
pub struct SqlitePostStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqlitePostStore {
    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CipherLogError::Storage("SQLite connection poisoned".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
        Ok(conn
            .query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn temp_sibling(path: &Path) -> Result<PathBuf> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CipherLogError::Storage("Invalid backup filename".to_string()))?;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CipherLogError::Storage(format!("System time error: {}", e)))?
            .as_nanos();
        Ok(parent.join(format!("{}.{}.tmp", filename, nanos)))
    }
}

impl PostStore for SqlitePostStore {
    fn create(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(CipherLogError::StoreExists);
        }
        debug!(path = %path.display(), "creating post store");

        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE posts (
                slug TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                is_encrypted INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX posts_created_at ON posts (created_at);
            "#,
        )?;

        let created_at = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", &created_at],
        )?;

        Ok(())
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CipherLogError::StoreNotFound);
        }
        debug!(path = %path.display(), "opening post store");

        let conn = Connection::open(path)?;
        let has_meta: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'meta'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if has_meta.is_none() {
            return Err(CipherLogError::Storage(
                "Store metadata missing".to_string(),
            ));
        }

        match Self::read_meta(&conn, "format_version")? {
            Some(version) if version == FORMAT_VERSION => {}
            Some(version) => {
                return Err(CipherLogError::Storage(format!(
                    "Unsupported store format version: {}",
                    version
                )))
            }
            None => {
                return Err(CipherLogError::Storage(
                    "Store format version missing".to_string(),
                ))
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let format_version = Self::read_meta(&conn, "format_version")?
            .ok_or_else(|| CipherLogError::Storage("Store format version missing".to_string()))?;
        let created_at_str = Self::read_meta(&conn, "created_at")?
            .ok_or_else(|| CipherLogError::Storage("Store created_at missing".to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| CipherLogError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        let (post_count, encrypted_count): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_encrypted), 0) FROM posts",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(StoreMetadata {
            format_version,
            created_at,
            post_count: post_count.max(0) as u64,
            encrypted_count: encrypted_count.max(0) as u64,
        })
    }

    fn save_post(&mut self, post: &NewPost) -> Result<Post> {
        validate_slug(&post.slug)?;
        validate_title(&post.title)?;
        validate_content(&post.content)?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let newest: Option<i64> =
            tx.query_row("SELECT MAX(created_at) FROM posts", [], |row| row.get(0))?;
        let now = Utc::now().timestamp_millis();
        let created_at = match newest {
            Some(newest) => now.max(newest + 1),
            None => now,
        };

        tx.execute(
            "INSERT OR REPLACE INTO posts (slug, title, content, is_encrypted, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                &post.slug,
                &post.title,
                &post.content,
                post.is_encrypted,
                created_at,
            ),
        )?;
        tx.commit()?;

        debug!(slug = %post.slug, encrypted = post.is_encrypted, "saved post");

        Post::try_from(PostRow {
            slug: post.slug.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            is_encrypted: i64::from(post.is_encrypted),
            created_at,
        })
    }

    fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM posts WHERE slug = ?", PostRow::COLUMNS),
                [slug],
                PostRow::from_row,
            )
            .optional()?;
        row.map(Post::try_from).transpose()
    }

    fn list_posts(&self, filter: &PostFilter) -> Result<Vec<PostSummary>> {
        let conn = self.lock_conn()?;
        let limit = filter
            .limit
            .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts
             WHERE (?1 IS NULL OR is_encrypted = ?1)
             ORDER BY created_at DESC, slug ASC
             LIMIT ?2",
            SummaryRow::COLUMNS
        ))?;
        let rows = stmt.query_map((filter.encrypted, limit), SummaryRow::from_row)?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(PostSummary::try_from(row?)?);
        }
        Ok(summaries)
    }

    fn delete_post(&mut self, slug: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM posts WHERE slug = ?", [slug])?;
        debug!(slug, removed, "deleted post");
        Ok(removed > 0)
    }

    fn list_encrypted_posts(&self) -> Result<Vec<Post>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts WHERE is_encrypted = 1 ORDER BY created_at DESC, slug ASC",
            PostRow::COLUMNS
        ))?;
        let rows = stmt.query_map([], PostRow::from_row)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(Post::try_from(row?)?);
        }
        Ok(posts)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(CipherLogError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 2 {
            return Err(CipherLogError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let bad_flags: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE is_encrypted NOT IN (0, 1)",
            [],
            |row| row.get(0),
        )?;
        if bad_flags > 0 {
            return Err(CipherLogError::Storage(format!(
                "{} post(s) have an invalid is_encrypted flag",
                bad_flags
            )));
        }

        Ok(())
    }

    fn backup_to(&self, dest: &Path) -> Result<()> {
        if dest == self.path {
            return Err(CipherLogError::InvalidInput(
                "Backup destination is the store itself".to_string(),
            ));
        }

        let temp_path = Self::temp_sibling(dest)?;
        let temp_str = temp_path
            .to_str()
            .ok_or_else(|| CipherLogError::Storage("Backup path is not valid UTF-8".to_string()))?;

        {
            let conn = self.lock_conn()?;
            if let Err(err) = conn.execute("VACUUM INTO ?", [temp_str]) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(err.into());
            }
        }

        crate::fs::rename_with_fallback(&temp_path, dest)
            .map_err(|e| CipherLogError::Storage(format!("Atomic rename failed: {}", e)))?;
        debug!(dest = %dest.display(), "wrote store backup");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqlitePostStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.db");
        SqlitePostStore::create(&path).unwrap();
        let store = SqlitePostStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.db");
        SqlitePostStore::create(&path).unwrap();
        assert!(matches!(
            SqlitePostStore::create(&path),
            Err(CipherLogError::StoreExists)
        ));
    }

    #[test]
    fn test_open_missing_fails() {
        let dir = TempDir::new().unwrap();
        let result = SqlitePostStore::open(&dir.path().join("missing.db"));
        assert!(matches!(result, Err(CipherLogError::StoreNotFound)));
    }

    #[test]
    fn test_open_foreign_database_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        assert!(matches!(
            SqlitePostStore::open(&path),
            Err(CipherLogError::Storage(_))
        ));
    }

    #[test]
    fn test_open_unsupported_version_fails() {
        let (dir, store) = temp_store();
        store
            .lock_conn()
            .unwrap()
            .execute(
                "UPDATE meta SET value = '99' WHERE key = 'format_version'",
                [],
            )
            .unwrap();
        drop(store);

        let err = SqlitePostStore::open(&dir.path().join("posts.db"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unsupported store format version"));
    }

    #[test]
    fn test_created_at_strictly_increases() {
        let (_dir, mut store) = temp_store();
        let mut last = None;
        for i in 0..20 {
            let post = store
                .save_post(&NewPost::new(format!("p{}", i), "T", "body"))
                .unwrap();
            if let Some(previous) = last {
                assert!(post.created_at > previous);
            }
            last = Some(post.created_at);
        }
    }

    #[test]
    fn test_replace_keeps_single_row() {
        let (_dir, mut store) = temp_store();
        store.save_post(&NewPost::new("a", "First", "one")).unwrap();
        store.save_post(&NewPost::new("a", "Second", "two")).unwrap();

        let posts = store.list_posts(&PostFilter::new()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Second");
        assert_eq!(store.get_post("a").unwrap().unwrap().content, "two");
    }

    #[test]
    fn test_save_rejects_invalid_slug() {
        let (_dir, mut store) = temp_store();
        let result = store.save_post(&NewPost::new("admin", "T", "body"));
        assert!(matches!(result, Err(CipherLogError::Validation(_))));
    }

    #[test]
    fn test_integrity_flags_bad_is_encrypted() {
        let (_dir, store) = temp_store();
        store.check_integrity().unwrap();

        store
            .lock_conn()
            .unwrap()
            .execute(
                "INSERT INTO posts (slug, title, content, is_encrypted, created_at)
                 VALUES ('x', 'X', 'c', 7, 0)",
                [],
            )
            .unwrap();

        let err = store.check_integrity().unwrap_err();
        assert!(err.to_string().contains("invalid is_encrypted"));
    }

    #[test]
    fn test_integrity_ignores_content_shape() {
        let (_dir, mut store) = temp_store();
        store
            .save_post(&NewPost::new("junk", "Junk", "not an envelope").with_encrypted(true))
            .unwrap();
        store.check_integrity().unwrap();
    }

    #[test]
    fn test_backup_to_self_rejected() {
        let (dir, store) = temp_store();
        let result = store.backup_to(&dir.path().join("posts.db"));
        assert!(matches!(result, Err(CipherLogError::InvalidInput(_))));
    }
}
