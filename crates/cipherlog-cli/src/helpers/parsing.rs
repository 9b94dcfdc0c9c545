//! Parsing helpers for output format and list filters.

/// Output format requested with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Plain => "plain",
        }
    }
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use table or plain)",
            other
        )),
    }
}

/// Map `--encrypted` / `--plain` onto the store's encryption filter.
pub fn encryption_filter(encrypted: bool, plain: bool) -> Option<bool> {
    match (encrypted, plain) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        );
        assert_eq!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        );
        assert!(parse_output_format(Some("yaml")).is_err());
        assert_eq!(OutputFormat::Plain.as_str(), "plain");
    }

    #[test]
    fn test_encryption_filter() {
        assert_eq!(encryption_filter(true, false), Some(true));
        assert_eq!(encryption_filter(false, true), Some(false));
        assert_eq!(encryption_filter(false, false), None);
    }
}
