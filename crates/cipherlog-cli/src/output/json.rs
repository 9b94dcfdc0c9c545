//! JSON output for posts.

use cipherlog_core::storage::{Post, PostSummary};

/// A post as JSON. `body` is the readable text; the stored envelope is
/// never emitted.
pub fn post_json(post: &Post, body: &str) -> serde_json::Value {
    serde_json::json!({
        "slug": post.slug,
        "title": post.title,
        "is_encrypted": post.is_encrypted,
        "created_at": post.created_at,
        "content": body,
    })
}

pub fn summaries_json(summaries: &[PostSummary]) -> serde_json::Value {
    serde_json::Value::Array(
        summaries
            .iter()
            .map(|summary| {
                serde_json::json!({
                    "slug": summary.slug,
                    "title": summary.title,
                    "is_encrypted": summary.is_encrypted,
                    "created_at": summary.created_at,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_post_json_uses_given_body() {
        let post = Post {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            content: "c2FsdA==:bm9uY2U=:Y3Q=".to_string(),
            is_encrypted: true,
            created_at: Utc::now(),
        };
        let value = post_json(&post, "secret text");
        assert_eq!(value["content"], "secret text");
        assert_eq!(value["is_encrypted"], true);
    }

    #[test]
    fn test_summaries_json_is_array() {
        let summaries = vec![PostSummary {
            slug: "a".to_string(),
            title: "A".to_string(),
            is_encrypted: false,
            created_at: Utc::now(),
        }];
        let value = summaries_json(&summaries);
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["slug"], "a");
        assert!(value[0].get("content").is_none());
    }
}
