//! Progress indicators with plain-output fallback for CI

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A task spinner that degrades to plain lines when stderr is not a terminal
pub struct TaskSpinner {
    bar: Option<ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new() -> Self {
        Self {
            bar: None,
            interactive: console::Term::stderr().is_term(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let bar = ProgressBar::new_spinner();
            bar.set_style(ProgressStyle::default_spinner());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar.set_message(message.to_string());
            self.bar = Some(bar);
        } else {
            eprintln!("... {message}");
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        if self.interactive {
            eprintln!("{} {}", style("✓").green(), message);
        } else {
            eprintln!("[OK] {message}");
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        if self.interactive {
            eprintln!("{} {}", style("✗").red(), message);
        } else {
            eprintln!("[FAIL] {message}");
        }
    }
}

impl Default for TaskSpinner {
    fn default() -> Self {
        Self::new()
    }
}
