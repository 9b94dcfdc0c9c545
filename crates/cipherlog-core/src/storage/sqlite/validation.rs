//! Post field validation.

use crate::error::{CipherLogError, Result};

/// Maximum bytes per slug.
pub const MAX_SLUG_BYTES: usize = 128;

/// Maximum characters per title.
pub const MAX_TITLE_CHARS: usize = 256;

/// Maximum bytes of stored content (plaintext or envelope).
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Slugs that collide with route names.
const RESERVED_SLUGS: &[&str] = &["api", "admin"];

/// Validate a slug.
///
/// - 1 to 128 bytes
/// - ASCII letters, digits, dash, underscore
/// - Not a reserved route name
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(CipherLogError::Validation("Slug cannot be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_BYTES {
        return Err(CipherLogError::Validation(format!(
            "Slug too long (max {} bytes)",
            MAX_SLUG_BYTES
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CipherLogError::Validation(
            "Slug contains invalid characters".to_string(),
        ));
    }
    if RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
    {
        return Err(CipherLogError::Validation(format!(
            "Slug '{}' is reserved",
            slug
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CipherLogError::Validation(
            "Title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(CipherLogError::Validation(format!(
            "Title too long (max {} characters)",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<()> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(CipherLogError::Validation(format!(
            "Content too large (max {} bytes)",
            MAX_CONTENT_BYTES
        )));
    }
    Ok(())
}
