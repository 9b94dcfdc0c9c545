//! UI primitives for the CipherLog CLI.
//!
//! - **Context**: environment detection (TTY, width, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and styling
//! - **Render**: headers, receipts, hints, tables
//! - **Progress**: spinners and step lists
//! - **Format**: string utilities

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header_with_context, hint, kv, print, print_error,
    receipt, simple_table, Column,
};

pub use progress::{Spinner, StepList};

pub use format::{encrypted_label, format_bytes, format_datetime, single_line, truncate};
