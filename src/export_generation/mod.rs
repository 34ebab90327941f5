/// Export generation domain: records, filters, policies, and the pure
/// services that turn search results into export rows
pub mod domain;
pub mod policies;
pub mod services;
