use crate::export_generation::domain::ExportRow;
use crate::shared::Result;

/// ExportFormatter port for serializing export rows
pub trait ExportFormatter: Send + Sync {
    /// Serializes rows, header first, in the fixed export column order
    ///
    /// # Errors
    /// Returns an error if a row cannot be encoded
    fn format(&self, rows: &[ExportRow]) -> Result<Vec<u8>>;

    /// MIME type of the produced document
    fn content_type(&self) -> &'static str;

    /// File extension of the produced document, without the dot
    fn file_extension(&self) -> &'static str;
}
