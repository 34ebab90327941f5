/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registry API, CSV output, logging).
pub mod company_search;
pub mod export_formatter;
pub mod http_transport;
pub mod officer_repository;
pub mod progress_reporter;
pub mod registry_api;

pub use company_search::{CompanySearch, SearchOutcome};
pub use export_formatter::ExportFormatter;
pub use http_transport::{ApiRequest, ApiResponse, HttpTransport};
pub use officer_repository::OfficerRepository;
pub use progress_reporter::ProgressReporter;
pub use registry_api::RegistryApi;
