use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with stdout output.
/// The bar lives behind a mutex because status polling reports from a
/// background task.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: false,
        }
    }

    /// Creates a reporter that prints nothing
    pub fn quiet() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: true,
        }
    }

    fn update_progress_bar(&self, current: usize, total: usize, message: Option<&str>) {
        let Ok(mut slot) = self.progress_bar.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            // Template is static; fall back to the default style if it ever fails to parse
            if let Ok(style) = ProgressStyle::default_bar()
                .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        });
        pb.set_length(total as u64);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn finish_progress_bar(&self) {
        if let Ok(mut slot) = self.progress_bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if !self.quiet {
            self.update_progress_bar(current, total, message);
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
