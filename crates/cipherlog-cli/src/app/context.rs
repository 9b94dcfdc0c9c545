//! Application context shared by command handlers.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use cipherlog_core::{CipherCodec, PostStore, SqlitePostStore};

use crate::cli::Cli;
use crate::config::{read_config, CipherLogConfig, LogFormat};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{
    missing_store_message, resolve_config_path, resolve_store_path, MISSING_STORE_HINT,
};

/// CLI arguments plus lazily-loaded configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<CipherLogConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&CipherLogConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.and_then(|c| c.ui.editor.as_deref()))
    }

    /// Log format and level: `--log-format` beats config.
    pub fn logging_settings(&self) -> (LogFormat, Option<String>) {
        let config = self.config().ok().flatten();
        let format = self
            .cli
            .log_format
            .or_else(|| config.map(|c| c.logging.format))
            .unwrap_or_default();
        let level = config.and_then(|c| c.logging.level.clone());
        (format, level)
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Open the post store, failing with a not-found hint if it is missing.
    pub fn open_store(&self) -> anyhow::Result<(SqlitePostStore, PathBuf)> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(
                CliError::not_found(missing_store_message(&path), MISSING_STORE_HINT).into(),
            );
        }
        let store = SqlitePostStore::open(&path)?;
        Ok((store, path))
    }

    pub fn codec(&self) -> CipherCodec {
        CipherCodec::system()
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color)
    }
}
