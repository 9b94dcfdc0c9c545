//! Path resolution for the config file and the post store.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, CipherLogConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking `CIPHERLOG_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path: `--store`/`CIPHERLOG_STORE`, then config, then
/// the XDG data default.
pub fn resolve_store_path(cli: &Cli, config: Option<&CipherLogConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

pub const MISSING_STORE_HINT: &str = "Hint: Run `cipherlog init` or pass --store <path>.";

/// Error text when no store exists at the resolved path.
pub fn missing_store_message(path: &Path) -> String {
    format!("No post store found at {}", path.display())
}
