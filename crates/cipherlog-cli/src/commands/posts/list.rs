use cipherlog_core::storage::PostFilter;
use cipherlog_core::PostStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{encryption_filter, parse_output_format};
use crate::output::{summaries_json, summary_columns, summary_rows};
use crate::ui::{badge, blank_line, header_with_context, hint, print, simple_table, Badge};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let (store, path) = ctx.open_store()?;

    let mut filter = PostFilter::new();
    let encrypted = encryption_filter(args.encrypted, args.plain);
    if let Some(encrypted) = encrypted {
        filter = filter.encrypted(encrypted);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }
    let summaries = store.list_posts(&filter)?;

    let ui_ctx = ctx.ui_context(args.json, format.map(|f| f.as_str()));
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&summaries_json(&summaries))?);
        return Ok(());
    }

    let context = match encrypted {
        Some(true) => Some("encrypted"),
        Some(false) => Some("plain"),
        None => None,
    };
    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let path_display = path.display().to_string();
        print(
            &ui_ctx,
            &header_with_context(&ui_ctx, "list", context, Some(&path_display)),
        );
        blank_line(&ui_ctx);
    }

    if summaries.is_empty() {
        if ui_ctx.mode.is_pretty() && !ctx.quiet() {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No posts found"));
            print(
                &ui_ctx,
                &hint(&ui_ctx, "cipherlog publish <slug> --title <title>"),
            );
        }
        return Ok(());
    }

    let rows = summary_rows(&ui_ctx, &summaries);
    print(&ui_ctx, &simple_table(&ui_ctx, &summary_columns(), &rows));
    Ok(())
}
