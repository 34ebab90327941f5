use crate::export_generation::domain::DirectorRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// OfficerRepository port for a company's officer list
#[async_trait]
pub trait OfficerRepository: Send + Sync {
    /// Fetches all officers of one company, in registry order
    ///
    /// A company unknown to the officers endpoint (HTTP 404) or with no
    /// recorded officers yields an empty list, not an error.
    ///
    /// # Errors
    /// Propagates authentication, rate-limit, upstream, and network failures
    async fn fetch_officers(&self, company_number: &str) -> Result<Vec<DirectorRecord>>;
}
