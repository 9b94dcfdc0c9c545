use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cipherlog_core::VERSION;

use crate::config::LogFormat;

/// CipherLog - a small post store with optional per-post encryption
#[derive(Parser)]
#[command(name = "cipherlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the post store
    #[arg(short, long, global = true, env = "CIPHERLOG_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Diagnostic log format on stderr
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Set default editor for composing posts
    #[arg(long)]
    pub editor: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `publish` command
#[derive(Args)]
pub struct PublishArgs {
    /// URL-safe identifier of the post
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Post title
    #[arg(short, long)]
    pub title: String,

    /// Post body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Encrypt the body with a password
    #[arg(short, long)]
    pub encrypt: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only encrypted posts
    #[arg(long, conflicts_with = "plain")]
    pub encrypted: bool,

    /// Only unencrypted posts
    #[arg(long)]
    pub plain: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Slug of the post
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `reseal` command
#[derive(Args)]
pub struct ResealArgs {
    /// Slug of the encrypted post
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Slug of the post
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new post store
    Init(InitArgs),

    /// Publish a post, optionally encrypted
    Publish(PublishArgs),

    /// List posts, newest first
    List(ListArgs),

    /// Show a post, decrypting it if needed
    Show(ShowArgs),

    /// Re-encrypt a post under a fresh salt and nonce
    Reseal(ResealArgs),

    /// Delete a post
    Delete(DeleteArgs),

    /// Check store integrity and envelope health
    Check,

    /// Back up the post store
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
