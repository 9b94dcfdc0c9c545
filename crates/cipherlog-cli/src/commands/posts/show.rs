use cipherlog_core::reveal_content;

use crate::app::{unlock_post, AppContext};
use crate::cli::ShowArgs;
use crate::output::{post_json, print_post};

use super::require_post;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let (store, _path) = ctx.open_store()?;
    let post = require_post(&store, &args.slug)?;
    let ui_ctx = ctx.ui_context(args.json, None);

    let codec = ctx.codec();
    let body = if post.is_encrypted {
        unlock_post(&ui_ctx, &codec, &post, args.no_input)?.plaintext
    } else {
        reveal_content(&codec, &post, None)?
    };

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&post_json(&post, &body))?);
    } else {
        print_post(&ui_ctx, &post, &body, ctx.quiet());
    }
    Ok(())
}
