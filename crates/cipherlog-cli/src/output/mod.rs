//! Output formatting for posts (JSON, table, plain text).

mod json;
mod text;

pub use json::{post_json, summaries_json};
pub use text::{print_post, summary_columns, summary_rows};
