use crate::ports::outbound::ProgressReporter;

/// TracingProgressReporter adapter for reporting export progress
///
/// The server has no terminal to draw on, so progress goes to the log as
/// structured `tracing` events under the current request span.
pub struct TracingProgressReporter;

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for TracingProgressReporter {
    fn report(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        tracing::info!(current, total, "{}", message.unwrap_or("Progress"));
    }

    fn report_error(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
