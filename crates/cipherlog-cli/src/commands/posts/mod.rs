pub mod delete;
pub mod list;
pub mod publish;
pub mod reseal;
pub mod show;

pub use delete::handle_delete;
pub use list::handle_list;
pub use publish::handle_publish;
pub use reseal::handle_reseal;
pub use show::handle_show;

use cipherlog_core::storage::Post;
use cipherlog_core::{PostStore, SqlitePostStore};

use crate::errors::CliError;

const LIST_HINT: &str = "Hint: Run `cipherlog list` to see available slugs.";

/// Fetch a post or fail with a not-found error and hint.
pub(crate) fn require_post(store: &SqlitePostStore, slug: &str) -> anyhow::Result<Post> {
    store
        .get_post(slug)?
        .ok_or_else(|| CliError::not_found(format!("Post not found: {}", slug), LIST_HINT).into())
}
