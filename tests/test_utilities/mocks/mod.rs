/// Mock implementations for testing
mod mock_progress_reporter;
mod stub_registry_transport;

pub use mock_progress_reporter::MockProgressReporter;
pub use stub_registry_transport::{company_json, officer_json, StubRegistryTransport};
