use std::io::IsTerminal;

use secrecy::ExposeSecret;
use tracing::info;

use cipherlog_core::{seal_content, PostStore};

use crate::app::AppContext;
use crate::cli::PublishArgs;
use crate::helpers::{prompt_new_password, read_post_body};
use crate::ui::{blank_line, encrypted_label, format_datetime, hint, print, receipt, Spinner};

pub fn handle_publish(ctx: &AppContext, args: &PublishArgs) -> anyhow::Result<()> {
    let (mut store, _path) = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(false, None);
    let interactive = std::io::stdin().is_terminal() && !args.no_input;

    let body = read_post_body(args.no_input, args.body.clone(), ctx.editor()?)?;
    let password = if args.encrypt {
        Some(prompt_new_password(interactive)?)
    } else {
        None
    };

    let spinner = Spinner::new(&ui_ctx, "Encrypting");
    if password.is_some() {
        spinner.start();
    }
    let sealed = seal_content(
        &ctx.codec(),
        &body,
        password.as_ref().map(|p| p.expose_secret()),
    );
    spinner.clear();

    let post = store.save_post(&sealed?.into_new_post(&args.slug, &args.title))?;
    info!(slug = %post.slug, encrypted = post.is_encrypted, "post published");

    if !ctx.quiet() {
        let created = format_datetime(&post.created_at, ui_ctx.mode.is_pretty());
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Published post",
                &[
                    ("Slug", &post.slug),
                    ("Encrypted", encrypted_label(post.is_encrypted)),
                    ("Created", &created),
                ],
            ),
        );
        if ui_ctx.mode.is_pretty() {
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(&ui_ctx, &format!("cipherlog show {}", post.slug)),
            );
        }
    }
    Ok(())
}
