pub mod address;
pub mod company_record;
pub mod director_record;
pub mod export_row;
pub mod export_state;
pub mod search_filter;

pub use address::Address;
pub use company_record::CompanyRecord;
pub use director_record::DirectorRecord;
pub use export_row::{ExportRow, EXPORT_COLUMNS};
pub use export_state::{ExportRun, ExportStage, ExportState};
pub use search_filter::{SearchFilter, SearchFilterBuilder};
