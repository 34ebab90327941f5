use crate::application::dto::{ExportRequest, ExportResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// CompanyExportPort - Inbound port for the company export use case
///
/// This port defines the interface that driving adapters (the web handler,
/// tests) use to run an export. It represents the application's public API.
#[async_trait]
pub trait CompanyExportPort: Send + Sync {
    /// Runs a complete export for the submitted filters
    ///
    /// # Errors
    /// Returns an error if:
    /// - No filter was supplied or a value is malformed
    /// - No company matches the filters
    /// - Any registry call fails (the whole export is abandoned)
    /// - The CSV cannot be written
    async fn export(&self, request: ExportRequest) -> Result<ExportResponse>;
}
