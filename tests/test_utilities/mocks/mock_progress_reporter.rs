use dtrack_upload::prelude::*;
use std::sync::{Arc, Mutex};

/// ProgressReporter that records every message with a kind prefix
/// ("Progress:", "Error:", "Completed:") so tests can check what the
/// operator would have seen.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages passed to `report_error`, without the prefix
    pub fn errors(&self) -> Vec<String> {
        self.with_prefix("Error: ")
    }

    /// Messages passed to `report_completion`, without the prefix
    pub fn completions(&self) -> Vec<String> {
        self.with_prefix("Completed: ")
    }

    fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.get_messages()
            .iter()
            .filter_map(|m| m.strip_prefix(prefix).map(str::to_string))
            .collect()
    }

    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(match message {
            Some(m) => format!("Progress: {}/{} - {}", current, total, m),
            None => format!("Progress: {}/{}", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.push(format!("Completed: {}", message));
    }
}
