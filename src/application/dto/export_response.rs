use chrono::{DateTime, Local};

/// ExportResponse - Finished export ready to be sent as a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    /// Suggested download name, e.g. `companies_export_20240131_094500.csv`
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
    pub company_count: usize,
    pub row_count: usize,
    /// The search stopped at the configured result cap
    pub truncated: bool,
}

/// Download name for an export generated at `timestamp`
pub fn export_filename(timestamp: DateTime<Local>, extension: &str) -> String {
    format!(
        "companies_export_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        extension
    )
}
