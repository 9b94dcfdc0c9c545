use std::io::IsTerminal;
use std::path::Path;

use tracing::info;

use cipherlog_core::fs::ensure_parent_dir;
use cipherlog_core::PostStore;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::helpers::confirm;
use crate::ui::theme::{styled, styles};
use crate::ui::{badge, blank_line, format_bytes, hint, print, Badge, OutputMode, Spinner};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let (store, _path) = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(false, None);
    let destination = Path::new(&args.destination);

    if std::io::stdin().is_terminal() && !ctx.quiet() {
        let proceed = confirm(&format!("Back up posts to {}?", args.destination), true)?;
        if !proceed {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, "Backup cancelled"));
                }
                OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
            }
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    ensure_parent_dir(destination).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create backup directory for {}: {}",
            destination.display(),
            e
        )
    })?;

    let spinner = Spinner::new(&ui_ctx, "Backing up");
    if !ctx.quiet() {
        spinner.start();
    }
    let result = store.backup_to(destination);
    match &result {
        Ok(()) => spinner.finish("Backup complete"),
        Err(_) => spinner.clear(),
    }
    result?;

    let bytes = std::fs::metadata(destination)
        .map_err(|e| anyhow::anyhow!("Failed to stat backup {}: {}", destination.display(), e))?
        .len();
    if bytes == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    info!(destination = %destination.display(), bytes, "backup written");

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                let context = format!(
                    "Path: {}  \u{00B7}  Size: {}",
                    args.destination,
                    format_bytes(bytes)
                );
                println!("{}", styled(&context, styles::dim(), ui_ctx.color));
                blank_line(&ui_ctx);
                print(&ui_ctx, &hint(&ui_ctx, "cipherlog --store <backup> check"));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("destination={}", args.destination);
                println!("bytes={}", bytes);
            }
        }
    }
    Ok(())
}
