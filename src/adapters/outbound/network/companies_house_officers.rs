use crate::export_generation::domain::{Address, DirectorRecord};
use crate::ports::outbound::{OfficerRepository, RegistryApi};
use crate::shared::error::ExportError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Officers requested per page
pub const OFFICERS_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct OfficerPage {
    #[serde(default)]
    items: Vec<OfficerItem>,
    #[serde(default)]
    total_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct OfficerItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    nationality: Option<String>,
    #[serde(default)]
    occupation: Option<String>,
    #[serde(default)]
    officer_role: Option<String>,
    #[serde(default)]
    appointed_on: Option<String>,
    #[serde(default)]
    resigned_on: Option<String>,
}

impl OfficerItem {
    fn into_record(self, company_number: &str) -> DirectorRecord {
        DirectorRecord {
            company_number: company_number.to_string(),
            name: self.name.unwrap_or_default(),
            address: self
                .address
                .map(|a| a.to_single_line())
                .unwrap_or_default(),
            nationality: self.nationality.unwrap_or_default(),
            occupation: self.occupation.unwrap_or_default(),
            role: self.officer_role.unwrap_or_default(),
            appointed_date: self.appointed_on.unwrap_or_default(),
            resigned_date: self.resigned_on.unwrap_or_default(),
        }
    }
}

/// CompaniesHouseOfficers adapter implementing the OfficerRepository port
///
/// Reads `/company/{number}/officers` ordered by appointment date. Most
/// companies fit in one page; larger boards are paged with `start_index`.
pub struct CompaniesHouseOfficers<A: RegistryApi> {
    api: A,
}

impl<A: RegistryApi> CompaniesHouseOfficers<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    fn endpoint_for(company_number: &str) -> String {
        format!(
            "/company/{}/officers",
            urlencoding::encode(company_number)
        )
    }

    fn page_params(start_index: usize) -> Vec<(String, String)> {
        vec![
            ("items_per_page".to_string(), OFFICERS_PAGE_SIZE.to_string()),
            ("start_index".to_string(), start_index.to_string()),
            ("order_by".to_string(), "appointed_on".to_string()),
            ("register_view".to_string(), "false".to_string()),
        ]
    }
}

#[async_trait]
impl<A: RegistryApi> OfficerRepository for CompaniesHouseOfficers<A> {
    async fn fetch_officers(&self, company_number: &str) -> Result<Vec<DirectorRecord>> {
        if let Err(e) = validate_url_component(company_number, "company number") {
            tracing::warn!(company_number, error = %e, "Skipping officer lookup");
            return Ok(Vec::new());
        }

        let endpoint = Self::endpoint_for(company_number);
        let mut officers = Vec::new();
        let mut start_index = 0;

        loop {
            let params = Self::page_params(start_index);
            let body = match self.api.call(&endpoint, &params).await {
                Ok(body) => body,
                Err(e) if matches!(e.downcast_ref::<ExportError>(), Some(ExportError::NotFound { .. })) => {
                    tracing::debug!(company_number, "No officers endpoint for company");
                    break;
                }
                Err(e) => return Err(e),
            };

            let page: OfficerPage =
                serde_json::from_value(body).map_err(|e| ExportError::InvalidResponse {
                    endpoint: endpoint.clone(),
                    details: e.to_string(),
                })?;

            let page_len = page.items.len();
            let total = page.total_results.unwrap_or(0);
            officers.extend(
                page.items
                    .into_iter()
                    .map(|item| item.into_record(company_number)),
            );

            if page_len == 0 || start_index + page_len >= total {
                break;
            }
            start_index += page_len;
        }

        Ok(officers)
    }
}
