//! Text and table output for posts.

use cipherlog_core::storage::{Post, PostSummary};

use crate::ui::theme::{styled, styles};
use crate::ui::{
    divider, encrypted_label, format_datetime, kv, single_line, truncate, Column, UiContext,
};

pub fn summary_columns() -> [Column; 4] {
    [
        Column::new("Slug"),
        Column::new("Created"),
        Column::new("Encrypted"),
        Column::new("Title"),
    ]
}

/// One row per post. Plain mode keeps the title last so it may contain
/// spaces without breaking field splitting.
pub fn summary_rows(ctx: &UiContext, summaries: &[PostSummary]) -> Vec<Vec<String>> {
    let pretty = ctx.mode.is_pretty();
    summaries
        .iter()
        .map(|summary| {
            let title = single_line(&summary.title);
            vec![
                summary.slug.clone(),
                format_datetime(&summary.created_at, pretty),
                encrypted_label(summary.is_encrypted).to_string(),
                if pretty { truncate(&title, 48) } else { title },
            ]
        })
        .collect()
}

/// Print a post with its readable body.
pub fn print_post(ctx: &UiContext, post: &Post, body: &str, quiet: bool) {
    if quiet {
        println!("{}", body);
        return;
    }
    if ctx.mode.is_pretty() {
        println!("{}", styled(&post.title, styles::bold(), ctx.color));
        println!("{}", kv(ctx, "Slug", &post.slug));
        println!("{}", kv(ctx, "Created", &format_datetime(&post.created_at, true)));
        println!(
            "{}",
            kv(ctx, "Encrypted", encrypted_label(post.is_encrypted))
        );
        println!("{}", divider(ctx));
    } else {
        println!("{}", kv(ctx, "Slug", &post.slug));
        println!("{}", kv(ctx, "Title", &single_line(&post.title)));
        println!("{}", kv(ctx, "Created", &format_datetime(&post.created_at, false)));
        println!(
            "{}",
            kv(ctx, "Encrypted", encrypted_label(post.is_encrypted))
        );
        println!();
    }
    println!("{}", body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use chrono::{TimeZone, Utc};

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_summary_rows_plain() {
        let summaries = vec![PostSummary {
            slug: "hello".to_string(),
            title: "Hello\nworld".to_string(),
            is_encrypted: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }];
        let rows = summary_rows(&plain_ctx(), &summaries);
        assert_eq!(
            rows,
            vec![vec![
                "hello".to_string(),
                "2024-01-02T03:04:05+00:00".to_string(),
                "yes".to_string(),
                "Hello world".to_string(),
            ]]
        );
    }

    #[test]
    fn test_summary_columns_match_row_width() {
        assert_eq!(summary_columns().len(), 4);
    }
}
