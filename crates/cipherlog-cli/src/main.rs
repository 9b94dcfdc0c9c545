//! CipherLog CLI - publish and read posts with optional per-post encryption.
//!
//! Thin command-line front end over `cipherlog-core`: argument parsing,
//! prompts, rendering and exit codes live here; storage and cryptography
//! do not.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;
use tracing::debug;

use cipherlog_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, maintenance, misc, posts};
use crate::errors::{display_message, exit_code_for};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    let (log_format, log_level) = ctx.logging_settings();
    if let Err(err) = logging::init_logging(log_format, log_level.as_deref()) {
        eprintln!("Warning: logging disabled: {}", err);
    }

    if let Err(e) = run(&ctx, &cli) {
        debug!(error = %e, "command failed");
        let ui_ctx = ctx.ui_context(false, None);
        let full = display_message(&e);
        let (message, hint) = extract_error_hint(&full);
        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split an error into its message and a hint.
///
/// An explicit "\nHint:" line in the message is used as-is; otherwise a
/// hint is picked for common failures.
fn extract_error_hint(error: &str) -> (&str, Option<String>) {
    if let Some(idx) = error.find("\nHint:") {
        return (&error[..idx], Some(error[idx + 1..].to_string()));
    }

    let lower = error.to_lowercase();
    let hint = if lower.contains("post not found") {
        Some("Hint: Run `cipherlog list` to see available slugs.")
    } else if lower.contains("post store not found") || lower.contains("no post store") {
        Some("Hint: Run `cipherlog init` to create a post store.")
    } else if lower.contains("reserved") {
        Some("Hint: Choose a different slug.")
    } else if lower.contains("unsupported store format") {
        Some("Hint: This store was written by a different CipherLog version.")
    } else if lower.contains("backup") && lower.contains("destination") {
        Some("Hint: Ensure the destination path is writable and differs from the store.")
    } else {
        None
    };
    (error, hint.map(str::to_string))
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Publish(args)) => posts::handle_publish(ctx, args)?,
        Some(Commands::List(args)) => posts::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => posts::handle_show(ctx, args)?,
        Some(Commands::Reseal(args)) => posts::handle_reseal(ctx, args)?,
        Some(Commands::Delete(args)) => posts::handle_delete(ctx, args)?,
        Some(Commands::Check) => maintenance::handle_check(ctx)?,
        Some(Commands::Backup(args)) => maintenance::handle_backup(ctx, args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("CipherLog v{}", VERSION);
            println!("\nQuickstart:");
            println!("  cipherlog init");
            println!("  cipherlog publish hello --title \"Hello\" --body \"Hi there\"");
            println!("  cipherlog publish diary --title \"Diary\" --encrypt");
            println!("  cipherlog list");
            println!("  cipherlog show diary");
            println!("\nRun `cipherlog --help` for full usage.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_hint_is_split_off() {
        let (message, hint) = extract_error_hint("No post store found at /x\nHint: Run init.");
        assert_eq!(message, "No post store found at /x");
        assert_eq!(hint.as_deref(), Some("Hint: Run init."));
    }

    #[test]
    fn test_contextual_hint_for_missing_post() {
        let (message, hint) = extract_error_hint("Post not found: hello");
        assert_eq!(message, "Post not found: hello");
        assert!(hint.unwrap().contains("cipherlog list"));
    }

    #[test]
    fn test_unlock_failure_has_no_hint() {
        let (message, hint) = extract_error_hint("Password incorrect.");
        assert_eq!(message, "Password incorrect.");
        assert!(hint.is_none());
    }
}
