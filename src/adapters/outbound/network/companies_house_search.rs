use crate::export_generation::domain::{Address, CompanyRecord, SearchFilter};
use crate::ports::outbound::{CompanySearch, RegistryApi, SearchOutcome};
use crate::shared::error::ExportError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Advanced company search endpoint
pub const SEARCH_ENDPOINT: &str = "/advanced-search/companies";

/// Default number of companies requested per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default cap on companies collected by one search
pub const DEFAULT_MAX_RESULTS: usize = 1000;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<CompanyItem>,
    #[serde(default)]
    hits: Option<usize>,
    #[serde(default)]
    total_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CompanyItem {
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    company_number: Option<String>,
    #[serde(default)]
    company_status: Option<String>,
    #[serde(default)]
    company_type: Option<String>,
    #[serde(default)]
    company_subtype: Option<String>,
    #[serde(default)]
    date_of_cessation: Option<String>,
    #[serde(default)]
    dissolution_date: Option<String>,
    #[serde(default)]
    date_of_creation: Option<String>,
    #[serde(default)]
    incorporation_date: Option<String>,
    #[serde(default)]
    removed_date: Option<String>,
    #[serde(default)]
    registered_date: Option<String>,
    #[serde(default)]
    sic_codes: Option<Vec<String>>,
    #[serde(default)]
    registered_office_address: Option<Address>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<CompanyItem> for CompanyRecord {
    fn from(item: CompanyItem) -> Self {
        let nature_of_business = item
            .sic_codes
            .unwrap_or_default()
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        CompanyRecord {
            company_name: item.company_name.unwrap_or_default(),
            company_number: item.company_number.unwrap_or_default(),
            company_status: item.company_status.unwrap_or_default(),
            company_type: item.company_type.unwrap_or_default(),
            company_subtype: item.company_subtype.unwrap_or_default(),
            dissolution_date: non_empty(item.date_of_cessation)
                .or(item.dissolution_date)
                .unwrap_or_default(),
            incorporation_date: non_empty(item.date_of_creation)
                .or(item.incorporation_date)
                .unwrap_or_default(),
            removed_date: item.removed_date.unwrap_or_default(),
            registered_date: item.registered_date.unwrap_or_default(),
            nature_of_business,
            registered_office_address: item
                .registered_office_address
                .map(|a| a.to_single_line())
                .unwrap_or_default(),
        }
    }
}

/// CompaniesHouseSearch adapter implementing the CompanySearch port
///
/// Pages through `/advanced-search/companies` with `size`/`start_index`
/// until the registry has no more results or `max_results` companies have
/// been collected. Results keep registry order.
pub struct CompaniesHouseSearch<A: RegistryApi> {
    api: A,
    page_size: usize,
    max_results: usize,
}

impl<A: RegistryApi> CompaniesHouseSearch<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            page_size: DEFAULT_PAGE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }
}

#[async_trait]
impl<A: RegistryApi> CompanySearch for CompaniesHouseSearch<A> {
    async fn search(&self, filter: &SearchFilter) -> Result<SearchOutcome> {
        let base_params = filter.to_query_params();
        let mut companies: Vec<CompanyRecord> = Vec::new();
        let mut total_available = 0;
        let mut start_index = 0;

        loop {
            let size = self.page_size.min(self.max_results - companies.len());
            let mut params = base_params.clone();
            params.push(("size".to_string(), size.to_string()));
            params.push(("start_index".to_string(), start_index.to_string()));

            let body = match self.api.call(SEARCH_ENDPOINT, &params).await {
                Ok(body) => body,
                Err(e) if matches!(e.downcast_ref::<ExportError>(), Some(ExportError::NotFound { .. })) => {
                    // The advanced search answers 404 when nothing matches
                    tracing::debug!(start_index, "Search returned 404, no further results");
                    break;
                }
                Err(e) => return Err(e),
            };

            let page: SearchPage =
                serde_json::from_value(body).map_err(|e| ExportError::InvalidResponse {
                    endpoint: SEARCH_ENDPOINT.to_string(),
                    details: e.to_string(),
                })?;

            let page_len = page.items.len();
            total_available = page.hits.or(page.total_results).unwrap_or(0);
            companies.extend(page.items.into_iter().map(CompanyRecord::from));

            tracing::debug!(
                start_index,
                page_len,
                collected = companies.len(),
                total_available,
                "Fetched search page"
            );

            if page_len == 0 || start_index + page_len >= total_available {
                break;
            }
            if companies.len() >= self.max_results {
                break;
            }

            start_index += page_len;
        }

        companies.truncate(self.max_results);
        let truncated = companies.len() >= self.max_results && total_available > companies.len();
        if truncated {
            tracing::warn!(
                collected = companies.len(),
                total_available,
                "Search stopped at the result cap"
            );
        }

        Ok(SearchOutcome {
            total_available: total_available.max(companies.len()),
            companies,
            truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// RegistryApi stub serving a fixed list of companies page by page
    struct PagedRegistry {
        total: usize,
        report_total: bool,
        calls: Mutex<Vec<Vec<(String, String)>>>,
    }

    impl PagedRegistry {
        fn new(total: usize) -> Self {
            Self {
                total,
                report_total: true,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn param(params: &[(String, String)], key: &str) -> usize {
            params
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| v.parse().ok())
                .unwrap()
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RegistryApi for PagedRegistry {
        async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Result<serde_json::Value> {
            assert_eq!(endpoint, SEARCH_ENDPOINT);
            self.calls.lock().unwrap().push(params.to_vec());

            let size = Self::param(params, "size");
            let start = Self::param(params, "start_index");
            let end = (start + size).min(self.total);
            let items: Vec<serde_json::Value> = (start..end)
                .map(|i| {
                    json!({
                        "company_name": format!("COMPANY {}", i),
                        "company_number": format!("{:08}", i),
                        "company_status": "active",
                    })
                })
                .collect();

            if self.report_total {
                Ok(json!({ "items": items, "hits": self.total }))
            } else {
                Ok(json!({ "items": items }))
            }
        }
    }

    struct NotFoundRegistry;

    #[async_trait]
    impl RegistryApi for NotFoundRegistry {
        async fn call(&self, endpoint: &str, _params: &[(String, String)]) -> Result<serde_json::Value> {
            Err(ExportError::NotFound {
                endpoint: endpoint.to_string(),
            }
            .into())
        }
    }

    struct UnauthorizedRegistry;

    #[async_trait]
    impl RegistryApi for UnauthorizedRegistry {
        async fn call(&self, _endpoint: &str, _params: &[(String, String)]) -> Result<serde_json::Value> {
            Err(ExportError::Authentication.into())
        }
    }

    fn filter() -> SearchFilter {
        SearchFilter::builder().status("active").build().unwrap()
    }

    #[test]
    fn test_company_item_mapping() {
        let item: CompanyItem = serde_json::from_value(json!({
            "company_name": "ACME WIDGETS LIMITED",
            "company_number": "01234567",
            "company_status": "dissolved",
            "company_type": "ltd",
            "date_of_creation": "2001-05-04",
            "date_of_cessation": "2020-02-01",
            "sic_codes": ["62020", "62012"],
            "registered_office_address": {
                "address_line_1": "1 High Street",
                "locality": "Leeds",
                "postal_code": "LS1 1AA"
            }
        }))
        .unwrap();

        let record = CompanyRecord::from(item);
        assert_eq!(record.company_name, "ACME WIDGETS LIMITED");
        assert_eq!(record.company_number, "01234567");
        assert_eq!(record.incorporation_date, "2001-05-04");
        assert_eq!(record.dissolution_date, "2020-02-01");
        assert_eq!(record.nature_of_business, "62020 62012");
        assert_eq!(record.registered_office_address, "1 High Street, Leeds, LS1 1AA");
        assert_eq!(record.company_subtype, "");
        assert_eq!(record.removed_date, "");
    }

    #[test]
    fn test_company_item_date_fallbacks() {
        let item: CompanyItem = serde_json::from_value(json!({
            "company_number": "1",
            "incorporation_date": "1999-01-01",
            "dissolution_date": "2010-01-01",
            "removed_date": "2011-01-01",
            "registered_date": "1999-01-02"
        }))
        .unwrap();

        let record = CompanyRecord::from(item);
        assert_eq!(record.incorporation_date, "1999-01-01");
        assert_eq!(record.dissolution_date, "2010-01-01");
        assert_eq!(record.removed_date, "2011-01-01");
        assert_eq!(record.registered_date, "1999-01-02");
    }

    #[tokio::test]
    async fn test_paginates_until_total_reached() {
        let registry = PagedRegistry::new(250);
        let search = CompaniesHouseSearch::new(registry).with_page_size(100);

        let outcome = search.search(&filter()).await.unwrap();

        assert_eq!(outcome.companies.len(), 250);
        assert_eq!(outcome.total_available, 250);
        assert!(!outcome.truncated);
        assert_eq!(search.api.call_count(), 3);
        assert_eq!(outcome.companies[0].company_number, "00000000");
        assert_eq!(outcome.companies[249].company_number, "00000249");
    }

    #[tokio::test]
    async fn test_filter_params_sent_with_paging() {
        let search = CompaniesHouseSearch::new(PagedRegistry::new(5)).with_page_size(100);
        search.search(&filter()).await.unwrap();

        let calls = search.api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains(&("company_status".to_string(), "active".to_string())));
        assert!(calls[0].contains(&("size".to_string(), "100".to_string())));
        assert!(calls[0].contains(&("start_index".to_string(), "0".to_string())));
    }

    #[tokio::test]
    async fn test_stops_at_result_cap_and_flags_truncation() {
        let search = CompaniesHouseSearch::new(PagedRegistry::new(1000))
            .with_page_size(100)
            .with_max_results(150);

        let outcome = search.search(&filter()).await.unwrap();

        assert_eq!(outcome.companies.len(), 150);
        assert_eq!(outcome.total_available, 1000);
        assert!(outcome.truncated);
        assert_eq!(search.api.call_count(), 2);

        let calls = search.api.calls.lock().unwrap();
        assert!(calls[1].contains(&("size".to_string(), "50".to_string())));
    }

    #[tokio::test]
    async fn test_cap_equal_to_total_is_not_truncated() {
        let search = CompaniesHouseSearch::new(PagedRegistry::new(200))
            .with_page_size(100)
            .with_max_results(200);

        let outcome = search.search(&filter()).await.unwrap();
        assert_eq!(outcome.companies.len(), 200);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_missing_total_stops_after_first_page() {
        let mut registry = PagedRegistry::new(300);
        registry.report_total = false;
        let search = CompaniesHouseSearch::new(registry).with_page_size(100);

        let outcome = search.search(&filter()).await.unwrap();
        assert_eq!(outcome.companies.len(), 100);
        assert_eq!(search.api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_not_found_means_no_results() {
        let search = CompaniesHouseSearch::new(NotFoundRegistry);
        let outcome = search.search(&filter()).await.unwrap();
        assert!(outcome.companies.is_empty());
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_authentication_error_is_propagated() {
        let search = CompaniesHouseSearch::new(UnauthorizedRegistry);
        let err = search.search(&filter()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExportError>(),
            Some(ExportError::Authentication)
        ));
    }
}
