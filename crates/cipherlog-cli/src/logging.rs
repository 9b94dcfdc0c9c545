//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` overrides the configured level.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const LOG_CONFIGURATION_ENVVAR: &str = "RUST_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: `RUST_LOG`, then config, then the default.
pub fn filter_directive(env_value: Option<&str>, configured: Option<&str>) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

pub fn init_logging(format: LogFormat, configured_level: Option<&str>) -> anyhow::Result<()> {
    let env_value = std::env::var(LOG_CONFIGURATION_ENVVAR).ok();
    let filter = EnvFilter::try_new(filter_directive(env_value.as_deref(), configured_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_env_filter(filter);

    match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init(),
    }
    .map_err(|err| anyhow::anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_config() {
        assert_eq!(filter_directive(Some("debug"), Some("info")), "debug");
    }

    #[test]
    fn test_config_used_without_env() {
        assert_eq!(filter_directive(None, Some("info")), "info");
        assert_eq!(filter_directive(Some("  "), Some("info")), "info");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(filter_directive(None, None), "warn");
    }
}
