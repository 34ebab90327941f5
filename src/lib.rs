//! registry-export - company registry search to CSV export
//!
//! A small web front end: a user fills in search filters, the server pages
//! through the registry's advanced company search, fetches the officers of
//! every matching company under a shared rate budget, and returns one CSV
//! row per company/officer pair as a download. The library follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`export_generation`): Export records, the export state
//!   machine, the rate budget policy, and row merging
//! - **Application Layer** (`application`): The export use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): The axum web front end, the registry HTTP
//!   client, and the CSV formatter
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use registry_export::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let transport = ReqwestTransport::new(DEFAULT_BASE_URL, "my-api-key", Duration::from_secs(30))?;
//! let client = Arc::new(RateLimitedClient::new(transport, Arc::new(RateBudget::default())));
//!
//! // Create use case
//! let use_case = ExportCompaniesUseCase::new(
//!     CompaniesHouseSearch::new(Arc::clone(&client)),
//!     CompaniesHouseOfficers::new(client),
//!     CsvFormatter::new(),
//!     TracingProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = ExportRequest {
//!     company_status: Some("active".to_string()),
//!     incorporated_from: Some("2024-01-01".to_string()),
//!     ..Default::default()
//! };
//! let response = use_case.execute(request).await?;
//! std::fs::write(&response.filename, &response.content)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod export_generation;
pub mod ports;
pub mod server;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::web::{router, AppState};
    pub use crate::adapters::outbound::console::TracingProgressReporter;
    pub use crate::adapters::outbound::formatters::CsvFormatter;
    pub use crate::adapters::outbound::network::{
        CompaniesHouseOfficers, CompaniesHouseSearch, RateLimitedClient, ReqwestTransport,
        DEFAULT_BASE_URL,
    };
    pub use crate::application::dto::{ExportRequest, ExportResponse};
    pub use crate::application::use_cases::ExportCompaniesUseCase;
    pub use crate::config::AppConfig;
    pub use crate::export_generation::domain::{
        CompanyRecord, DirectorRecord, ExportRow, ExportRun, ExportStage, ExportState,
        SearchFilter, EXPORT_COLUMNS,
    };
    pub use crate::export_generation::policies::{RateBudget, RateLimitSettings};
    pub use crate::export_generation::services::RowMerger;
    pub use crate::ports::inbound::CompanyExportPort;
    pub use crate::ports::outbound::{
        ApiRequest, ApiResponse, CompanySearch, ExportFormatter, HttpTransport, OfficerRepository,
        ProgressReporter, RegistryApi, SearchOutcome,
    };
    pub use crate::shared::error::ExportError;
    pub use crate::shared::Result;
}
