use secrecy::ExposeSecret;
use tracing::info;

use cipherlog_core::{seal_content, CipherEnvelope, PostStore};

use crate::app::{unlock_post, AppContext};
use crate::cli::ResealArgs;
use crate::errors::CliError;
use crate::ui::{print, receipt, Spinner};

use super::require_post;

/// Decrypt a post and store it again under a fresh salt and nonce.
///
/// Legacy two-segment envelopes come out in the current format. The post
/// is re-saved, so it moves to the top of the listing.
pub fn handle_reseal(ctx: &AppContext, args: &ResealArgs) -> anyhow::Result<()> {
    let (mut store, _path) = ctx.open_store()?;
    let post = require_post(&store, &args.slug)?;
    if !post.is_encrypted {
        return Err(CliError::invalid_input(format!(
            "Post '{}' is not encrypted; publish it again with --encrypt instead",
            post.slug
        ))
        .into());
    }

    let previous = CipherEnvelope::parse(&post.content)
        .map(|envelope| envelope.generation().as_str())
        .unwrap_or("unknown");

    let ui_ctx = ctx.ui_context(false, None);
    let codec = ctx.codec();
    let unlocked = unlock_post(&ui_ctx, &codec, &post, args.no_input)?;

    let spinner = Spinner::new(&ui_ctx, "Re-encrypting");
    spinner.start();
    let sealed = seal_content(
        &codec,
        &unlocked.plaintext,
        Some(unlocked.password.expose_secret()),
    );
    spinner.clear();

    let saved = store.save_post(&sealed?.into_new_post(&post.slug, &post.title))?;
    info!(slug = %saved.slug, previous, "post resealed");

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Resealed post",
                &[
                    ("Slug", &saved.slug),
                    ("Previous", previous),
                    ("Generation", "current"),
                ],
            ),
        );
    }
    Ok(())
}
