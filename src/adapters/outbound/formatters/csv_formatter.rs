use crate::export_generation::domain::{ExportRow, EXPORT_COLUMNS};
use crate::ports::outbound::ExportFormatter;
use crate::shared::error::ExportError;
use crate::shared::Result;

/// CsvFormatter adapter implementing the ExportFormatter port
///
/// Writes a header line followed by one record per row, comma separated and
/// CRLF terminated. Fields are quoted only when they need it.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_error(e: impl std::fmt::Display) -> ExportError {
        ExportError::CsvWrite {
            details: e.to_string(),
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportFormatter for CsvFormatter {
    fn format(&self, rows: &[ExportRow]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

        writer
            .write_record(EXPORT_COLUMNS)
            .map_err(Self::write_error)?;

        for row in rows {
            writer
                .write_record(row.values())
                .map_err(Self::write_error)?;
        }

        let bytes = writer.into_inner().map_err(Self::write_error)?;
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}
