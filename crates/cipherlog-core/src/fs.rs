//! Filesystem helpers.

use std::fs;
use std::io;
use std::path::Path;

/// Rename `temp_path` over `destination`.
///
/// Where `fs::rename` refuses to replace an existing file (notably Windows),
/// the destination is removed and the rename retried. On final failure the
/// temp file is removed.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rename_replaces_existing_snapshot() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("posts.db.tmp");
        let dest = dir.path().join("posts.db.bak");

        fs::write(&dest, b"old snapshot").unwrap();
        fs::write(&temp, b"new snapshot").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"new snapshot");
    }

    #[test]
    fn test_rename_missing_temp_fails() {
        let dir = tempdir().unwrap();
        let result = rename_with_fallback(&dir.path().join("nope"), &dir.path().join("dest"));
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("posts.db");
        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        assert!(ensure_parent_dir(Path::new("posts.db")).is_ok());
    }
}
