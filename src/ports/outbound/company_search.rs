use crate::export_generation::domain::{CompanyRecord, SearchFilter};
use crate::shared::Result;
use async_trait::async_trait;

/// Companies found by a search, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub companies: Vec<CompanyRecord>,
    /// Total the registry reported for the query
    pub total_available: usize,
    /// True when the result cap stopped the search before `total_available`
    pub truncated: bool,
}

/// CompanySearch port for retrieving every company matching a filter
#[async_trait]
pub trait CompanySearch: Send + Sync {
    /// Pages through the registry search until exhausted or capped
    ///
    /// # Errors
    /// Propagates any registry failure other than "no matches"
    async fn search(&self, filter: &SearchFilter) -> Result<SearchOutcome>;
}
