/// Console adapters: progress reporting through the log
mod progress_reporter;

pub use progress_reporter::TracingProgressReporter;
