//! Input and parsing helpers for the CLI.
//!
//! - Password prompting, post body reading and confirmations (`input`)
//! - Output format and filter parsing (`parsing`)

mod input;
mod parsing;

pub use input::{confirm, password_from_env, prompt_new_password, prompt_password, read_post_body};
pub use parsing::{encryption_filter, parse_output_format};
