use registry_export::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter that records every message and progress tick
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
    ticks: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// `(current, total)` pairs passed to `report_progress`, in order
    pub fn progress_ticks(&self) -> Vec<(usize, usize)> {
        self.ticks.lock().unwrap().clone()
    }

    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.get_messages()
            .iter()
            .any(|m| m.starts_with("Error: ") && m.contains(needle))
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.ticks.lock().unwrap().push((current, total));
        self.messages.lock().unwrap().push(format!(
            "Progress: {}/{} - {}",
            current,
            total,
            message.unwrap_or("")
        ));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}
