use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::Input;
use tracing::info;

use cipherlog_core::fs::ensure_parent_dir;
use cipherlog_core::{CipherLogError, PostStore, SqlitePostStore, VERSION};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, CipherLogConfig};
use crate::ui::theme::{styled, styles};
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let ui_ctx = ctx.ui_context(false, None);

    if !ctx.quiet() && ui_ctx.mode.is_pretty() {
        let version_line = format!("CipherLog v{}", VERSION);
        println!("{}", styled(&version_line, styles::dim(), ui_ctx.color));
        println!();
    }

    let default_store = default_store_path()?;
    let store_path = match args.path.clone().or_else(|| ctx.cli().store.clone()) {
        Some(value) => PathBuf::from(value),
        None if interactive => {
            let input: String = Input::new()
                .with_prompt("Post store location")
                .default(default_store.to_string_lossy().to_string())
                .interact_text()?;
            PathBuf::from(input)
        }
        None => default_store,
    };

    ensure_parent_dir(&store_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create directory for {}: {}",
            store_path.display(),
            e
        )
    })?;
    match SqlitePostStore::create(&store_path) {
        Ok(()) => {}
        Err(CipherLogError::StoreExists) => {
            return Err(anyhow::anyhow!(
                "A post store already exists at {}\nHint: Pass a different path or remove the existing file.",
                store_path.display()
            ));
        }
        Err(err) => return Err(err.into()),
    }

    let config_path = resolve_config_path()?;
    let config = CipherLogConfig::new(store_path.clone(), args.editor.clone());
    write_config(&config_path, &config)?;
    info!(store = %store_path.display(), config = %config_path.display(), "store initialized");

    if !ctx.quiet() {
        let store_display = store_path.display().to_string();
        let config_display = config_path.display().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Post store created",
                &[("Store", &store_display), ("Config", &config_display)],
            ),
        );
        if ui_ctx.mode.is_pretty() {
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(&ui_ctx, "cipherlog publish hello --title \"Hello\" --encrypt"),
            );
        }
    }
    Ok(())
}
