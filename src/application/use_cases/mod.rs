/// Use cases module containing application business logic orchestration
mod export_companies;

pub use export_companies::ExportCompaniesUseCase;
