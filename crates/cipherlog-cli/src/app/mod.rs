//! Application-level plumbing for the CipherLog CLI.
//!
//! - Path resolution for the config file and the post store
//! - Lazily loaded configuration shared by every command
//! - Password retry logic for encrypted posts

mod context;
mod resolver;
mod unlock;

pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use unlock::unlock_post;
