//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "CipherLog · command (context)" plus the store path
/// Plain mode: "cipherlog command"
pub fn header_with_context(
    ctx: &UiContext,
    command: &str,
    context: Option<&str>,
    path: Option<&str>,
) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("CipherLog", styles::bold(), ctx.color);
            let mut out = match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            };
            if let Some(p) = path {
                out.push('\n');
                out.push_str(&kv(ctx, "Store", &shorten_path(p)));
            }
            out
        }
        OutputMode::Plain => format!("cipherlog {}", command),
        OutputMode::Json => String::new(),
    }
}

fn shorten_path(path: &str) -> String {
    let count = path.chars().count();
    if count > 50 {
        let tail: String = path.chars().skip(count - 47).collect();
        format!("...{}", tail)
    } else {
        path.to_string()
    }
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        "\u{2500}".repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored
    } else {
        format!("{} {}", colored, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: badge plus indented key-value pairs
/// Plain mode: `status=ok` plus key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a borderless table.
///
/// Pretty mode: dim headers, padded columns
/// Plain mode: space-separated values, no header
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

/// Print to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (pretty mode only).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with "Hint: ..." on the next line
/// Plain mode: "error=message" with "hint=..."
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let error_hint = error_hint.map(|h| h.strip_prefix("Hint: ").unwrap_or(h));
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        let h = header_with_context(&pretty_ctx(), "list", Some("encrypted"), None);
        assert!(h.contains("CipherLog"));
        assert!(h.contains("list (encrypted)"));

        let h = header_with_context(&plain_ctx(), "list", None, Some("/tmp/posts.db"));
        assert_eq!(h, "cipherlog list");
    }

    #[test]
    fn test_header_shortens_long_store_path() {
        let long_path = "/a/very/long/path/that/exceeds/fifty/characters/for/sure/posts.db";
        let h = header_with_context(&pretty_ctx(), "show", None, Some(long_path));
        assert!(h.contains("Store:"));
        assert!(h.contains("..."));
        assert!(h.ends_with("posts.db"));
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&plain_ctx(), "Encrypted Posts", "2"), "encrypted_posts=2");
    }

    #[test]
    fn test_kv_and_hint_pretty() {
        let ctx = pretty_ctx();
        assert_eq!(kv(&ctx, "Slug", "hello"), "Slug: hello");
        assert_eq!(hint(&ctx, "try this"), "Hint: try this");
        assert_eq!(hint(&plain_ctx(), "try this"), "hint=try this");
    }

    #[test]
    fn test_badge_ascii_and_unicode() {
        assert_eq!(badge(&plain_ctx(), Badge::Ok, "Done"), "[OK] Done");
        assert_eq!(badge(&pretty_ctx(), Badge::Err, ""), "[\u{2717}]");
    }

    #[test]
    fn test_receipt_plain() {
        let r = receipt(&plain_ctx(), "Published", &[("Slug", "hello"), ("Encrypted", "yes")]);
        assert_eq!(r, "status=ok\nslug=hello\nencrypted=yes");
    }

    #[test]
    fn test_receipt_pretty() {
        let r = receipt(&pretty_ctx(), "Published", &[("Slug", "hello")]);
        assert!(r.starts_with("[\u{2713}] Published"));
        assert!(r.contains("  Slug: hello"));
    }

    #[test]
    fn test_simple_table_plain_has_no_header() {
        let columns = [Column::new("Slug"), Column::new("Title")];
        let rows = vec![
            vec!["a".to_string(), "First".to_string()],
            vec!["b".to_string(), "Second".to_string()],
        ];
        let t = simple_table(&plain_ctx(), &columns, &rows);
        assert_eq!(t, "a First\nb Second");
    }

    #[test]
    fn test_simple_table_pretty_has_header() {
        let columns = [Column::new("Slug"), Column::new("Title")];
        let rows = vec![vec!["a".to_string(), "First".to_string()]];
        let t = simple_table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Slug"));
        assert!(t.contains("First"));
    }

    #[test]
    fn test_divider() {
        assert!(divider(&pretty_ctx()).contains('\u{2500}'));
        assert_eq!(divider(&plain_ctx()), "---");
    }

    #[test]
    fn test_error_message_modes() {
        let e = error_message(&pretty_ctx(), "Something went wrong", Some("Try again"));
        assert!(e.contains("[\u{2717}] Something went wrong"));
        assert!(e.contains("Hint: Try again"));

        let e = error_message(&plain_ctx(), "Something went wrong", Some("Try again"));
        assert_eq!(e, "error=Something went wrong\nhint=Try again");

        let e = error_message(&plain_ctx(), "Gone", Some("Hint: Run init."));
        assert_eq!(e, "error=Gone\nhint=Run init.");
    }
}
