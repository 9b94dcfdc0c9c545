//! Password entry and retry logic for encrypted posts.

use std::io::IsTerminal;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use cipherlog_core::storage::Post;
use cipherlog_core::{reveal_content, CipherCodec, UNLOCK_FAILED_MESSAGE};

use crate::constants::INTERACTIVE_UNLOCK_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{password_from_env, prompt_password};
use crate::ui::{Spinner, UiContext};

const FORGOTTEN_PASSWORD_HINT: &str =
    "Hint: Encrypted posts cannot be recovered without their password.";

/// A decrypted post body and the password that opened it.
pub struct Unlocked {
    pub plaintext: String,
    pub password: SecretString,
}

/// Decrypt an encrypted post, prompting for the password.
///
/// `CIPHERLOG_PASSWORD` gets exactly one attempt. Otherwise a terminal
/// gets three prompts and anything else gets one. Every failure prints
/// the same message whether the password was wrong or the stored
/// envelope is damaged.
pub fn unlock_post(
    ui_ctx: &UiContext,
    codec: &CipherCodec,
    post: &Post,
    no_input: bool,
) -> anyhow::Result<Unlocked> {
    if let Some(password) = password_from_env() {
        return match try_unlock(ui_ctx, codec, post, &password) {
            Ok(Some(plaintext)) => Ok(Unlocked {
                plaintext,
                password,
            }),
            Ok(None) => Err(CliError::auth_failed(UNLOCK_FAILED_MESSAGE).into()),
            Err(err) => Err(err),
        };
    }

    let interactive = std::io::stdin().is_terminal() && !no_input;
    let max_attempts = if interactive {
        INTERACTIVE_UNLOCK_ATTEMPTS
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let password = prompt_password(interactive)?;
        if let Some(plaintext) = try_unlock(ui_ctx, codec, post, &password)? {
            return Ok(Unlocked {
                plaintext,
                password,
            });
        }

        warn!(slug = %post.slug, attempt = attempts, "unlock attempt failed");
        let remaining = max_attempts.saturating_sub(attempts);
        if remaining == 0 {
            return Err(
                CliError::auth_failed_with_hint(UNLOCK_FAILED_MESSAGE, FORGOTTEN_PASSWORD_HINT)
                    .into(),
            );
        }
        eprintln!(
            "{} {} attempt{} remaining.",
            UNLOCK_FAILED_MESSAGE,
            remaining,
            if remaining == 1 { "" } else { "s" }
        );
    }
}

/// One decryption attempt. `Ok(None)` means the post did not unlock.
fn try_unlock(
    ui_ctx: &UiContext,
    codec: &CipherCodec,
    post: &Post,
    password: &SecretString,
) -> anyhow::Result<Option<String>> {
    let spinner = Spinner::new(ui_ctx, "Unlocking");
    spinner.start();
    let result = reveal_content(codec, post, Some(password.expose_secret()));
    spinner.clear();

    match result {
        Ok(plaintext) => Ok(Some(plaintext)),
        Err(err) if err.is_unlock_failure() => Ok(None),
        Err(err) => Err(err.into()),
    }
}
