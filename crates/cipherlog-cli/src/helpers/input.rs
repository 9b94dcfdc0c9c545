//! Input handling for passwords, post bodies and confirmations.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{Confirm, Password};
use secrecy::SecretString;

use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

/// Read the post password from `CIPHERLOG_PASSWORD`, ignoring blank values.
pub fn password_from_env() -> Option<SecretString> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

/// Prompt for a post password to unlock with.
pub fn prompt_password(interactive: bool) -> anyhow::Result<SecretString> {
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Password for encrypting a post: env var first, else prompt twice.
pub fn prompt_new_password(interactive: bool) -> anyhow::Result<SecretString> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "--encrypt requires {} when prompts are disabled",
            PASSWORD_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Post password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Ask a yes/no question on the terminal.
pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read a post body from `--body`, stdin, or `$EDITOR`.
pub fn read_post_body(
    no_input: bool,
    body: Option<String>,
    editor_override: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = body {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("--body cannot be empty").into());
        }
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("No input provided on stdin").into());
        }
        return Ok(trimmed);
    }

    if no_input {
        return Err(CliError::invalid_input("--no-input requires --body or content on stdin").into());
    }

    read_body_from_editor(editor_override)
}

fn read_body_from_editor(editor_override: Option<&str>) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "cipherlog_post_{}_{}.md",
        std::process::id(),
        nanos
    ));
    std::fs::write(&path, "").map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("Editor command is empty"))?;
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    if !status.success() {
        let _ = std::fs::remove_file(&path);
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;
    let _ = std::fs::remove_file(&path);

    let trimmed = contents.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("Post body is empty").into());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flag_wins() {
        let body = read_post_body(true, Some("hello".to_string()), None).unwrap();
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_blank_body_flag_rejected() {
        let err = read_post_body(true, Some("   ".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("--body cannot be empty"));
    }

    #[test]
    fn test_prompt_password_requires_tty() {
        let err = prompt_password(false).unwrap_err();
        assert!(err.to_string().contains(PASSWORD_ENV));
    }
}
