use std::io::IsTerminal;

use tracing::info;

use cipherlog_core::PostStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::confirm;
use crate::ui::{badge, print, receipt, Badge, OutputMode};

use super::require_post;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let (mut store, _path) = ctx.open_store()?;
    let post = require_post(&store, &args.slug)?;
    let ui_ctx = ctx.ui_context(false, None);

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --yes",
            )
            .into());
        }
        let proceed = confirm(&format!("Delete post '{}'?", post.slug), false)?;
        if !proceed {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, "Delete cancelled"));
                }
                OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
            }
            return Ok(());
        }
    }

    if !store.delete_post(&post.slug)? {
        return Err(CliError::not_found(
            format!("Post not found: {}", post.slug),
            "Hint: It may have been deleted by another process.",
        )
        .into());
    }
    info!(slug = %post.slug, "post deleted");

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted post", &[("Slug", &post.slug)]),
        );
    }
    Ok(())
}
