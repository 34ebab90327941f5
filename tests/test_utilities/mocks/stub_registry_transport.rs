use async_trait::async_trait;
use registry_export::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// In-memory registry speaking the wire format of the real API
///
/// Serves paged `/advanced-search/companies` and
/// `/company/{number}/officers` responses from fixtures. Scripted responses,
/// when queued, are returned first regardless of path. Clones share the
/// request log, so a test can keep a handle after moving the transport into
/// a client.
#[derive(Clone, Default)]
pub struct StubRegistryTransport {
    companies: Arc<Vec<Value>>,
    officers: Arc<HashMap<String, Vec<Value>>>,
    search_status: Option<u16>,
    scripted: Arc<Mutex<VecDeque<ApiResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl StubRegistryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_companies(mut self, companies: Vec<Value>) -> Self {
        self.companies = Arc::new(companies);
        self
    }

    pub fn with_officers(mut self, company_number: &str, officers: Vec<Value>) -> Self {
        let mut map = (*self.officers).clone();
        map.insert(company_number.to_string(), officers);
        self.officers = Arc::new(map);
        self
    }

    /// Makes every search request answer with `status`
    pub fn with_search_status(mut self, status: u16) -> Self {
        self.search_status = Some(status);
        self
    }

    /// Queues a response served before any fixture-backed one
    pub fn with_scripted(self, response: ApiResponse) -> Self {
        self.scripted.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path == "/advanced-search/companies")
            .count()
    }

    pub fn officer_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path.ends_with("/officers"))
            .count()
    }

    fn paging(request: &ApiRequest, size_key: &str) -> (usize, usize) {
        let size = request
            .query_value(size_key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);
        let start = request
            .query_value("start_index")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        (start, size)
    }

    fn page(items: &[Value], start: usize, size: usize) -> Vec<Value> {
        items.iter().skip(start).take(size).cloned().collect()
    }

    fn search_response(&self, request: &ApiRequest) -> ApiResponse {
        if let Some(status) = self.search_status {
            return ApiResponse::new(status, r#"{"error":"stubbed failure"}"#);
        }
        if self.companies.is_empty() {
            return ApiResponse::new(404, "");
        }

        let (start, size) = Self::paging(request, "size");
        let body = json!({
            "items": Self::page(&self.companies, start, size),
            "hits": self.companies.len(),
        });
        ApiResponse::new(200, body.to_string())
    }

    fn officers_response(&self, request: &ApiRequest, company_number: &str) -> ApiResponse {
        let officers = self.officers.get(company_number).cloned().unwrap_or_default();
        let (start, size) = Self::paging(request, "items_per_page");
        let body = json!({
            "items": Self::page(&officers, start, size),
            "total_results": officers.len(),
        });
        ApiResponse::new(200, body.to_string())
    }
}

#[async_trait]
impl HttpTransport for StubRegistryTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(response) = self.scripted.lock().unwrap().pop_front() {
            return Ok(response);
        }

        if request.path == "/advanced-search/companies" {
            return Ok(self.search_response(request));
        }

        let officers_number = request
            .path
            .strip_prefix("/company/")
            .and_then(|rest| rest.strip_suffix("/officers"));
        match officers_number {
            Some(number) => Ok(self.officers_response(request, number)),
            None => Ok(ApiResponse::new(404, "")),
        }
    }
}

/// A search result item as the registry returns it
pub fn company_json(number: &str, name: &str, incorporated: &str) -> Value {
    json!({
        "company_name": name,
        "company_number": number,
        "company_status": "active",
        "company_type": "ltd",
        "date_of_creation": incorporated,
        "sic_codes": ["62020"],
        "registered_office_address": {
            "address_line_1": "1 Example Street",
            "locality": "London",
            "postal_code": "EC1A 1AA"
        }
    })
}

/// An officer list item as the registry returns it
pub fn officer_json(name: &str, role: &str) -> Value {
    json!({
        "name": name,
        "officer_role": role,
        "appointed_on": "2024-03-01",
        "nationality": "British",
        "occupation": "Director",
        "address": {
            "address_line_1": "2 Example Road",
            "locality": "Leeds"
        }
    })
}
