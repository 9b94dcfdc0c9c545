//! Progress indicators for slow work (key derivation, backups).

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;
use super::render::badge;
use super::theme::Badge;

const UNICODE_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];
const ASCII_TICKS: &[&str] = &["|", "/", "-", "\\", ""];

/// A spinner for indeterminate progress.
///
/// Only animates on a pretty TTY; everywhere else it is silent so plain
/// output stays stable.
pub struct Spinner<'a> {
    ctx: &'a UiContext,
    bar: Option<ProgressBar>,
}

impl<'a> Spinner<'a> {
    pub fn new(ctx: &'a UiContext, message: &str) -> Self {
        let bar = ctx.allows_animation().then(|| {
            let template = if ctx.color {
                "{spinner:.cyan} {msg}..."
            } else {
                "{spinner} {msg}..."
            };
            let style = ProgressStyle::with_template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(if ctx.unicode { UNICODE_TICKS } else { ASCII_TICKS });
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb.set_message(message.to_string());
            pb
        });

        Self { ctx, bar }
    }

    /// Begin ticking on a background thread.
    pub fn start(&self) {
        if let Some(bar) = &self.bar {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    /// Remove the spinner line without printing anything.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Finish with a success badge (pretty mode only).
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
            println!("{}", badge(self.ctx, Badge::Ok, message));
        }
    }
}

impl Drop for Spinner<'_> {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}

/// A list of named checks rendered as they complete.
pub struct StepList<'a> {
    ctx: &'a UiContext,
    steps: Vec<(String, Option<Badge>)>,
    current: usize,
}

impl<'a> StepList<'a> {
    pub fn new(ctx: &'a UiContext, steps: &[&str]) -> Self {
        Self {
            ctx,
            steps: steps.iter().map(|s| (s.to_string(), None)).collect(),
            current: 0,
        }
    }

    /// Print the "Header..." line in pretty mode.
    pub fn start(&self, header: &str) {
        if self.ctx.mode.is_pretty() {
            println!("{}...", header);
        }
    }

    /// Mark the current step with a result and advance.
    pub fn complete(&mut self, result: Badge) {
        if self.current < self.steps.len() {
            self.steps[self.current].1 = Some(result);
            self.render_step(self.current);
            self.current += 1;
        }
    }

    pub fn ok(&mut self) {
        self.complete(Badge::Ok);
    }

    pub fn warn(&mut self) {
        self.complete(Badge::Warn);
    }

    fn render_step(&self, index: usize) {
        let (name, result) = &self.steps[index];
        if self.ctx.mode.is_json() {
            return;
        }
        if self.ctx.mode.is_pretty() {
            let status = match result {
                Some(b) => badge(self.ctx, *b, ""),
                None => "...".to_string(),
            };
            println!("- {}: {}", name, status);
        } else {
            println!("check={} {}", step_key(name), status_word(*result));
        }
    }

    pub fn all_ok(&self) -> bool {
        self.steps
            .iter()
            .all(|(_, result)| *result == Some(Badge::Ok))
    }
}

fn step_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn status_word(result: Option<Badge>) -> &'static str {
    match result {
        Some(Badge::Ok) => "ok",
        Some(Badge::Warn) => "warn",
        Some(Badge::Err) => "err",
        Some(Badge::Info) => "info",
        None => "pending",
    }
}
