use crate::shared::Result;
use async_trait::async_trait;

/// A GET request against the registry API, relative to its base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path starting with `/`, e.g. `/advanced-search/companies`
    pub path: String,
    /// Query parameters in the order they should be sent
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Looks up the first value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path plus percent-encoded query string
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }
}

/// Raw response as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed `Retry-After` header in seconds, when present
    pub retry_after: Option<u64>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HttpTransport port: a single authenticated round trip to the registry
///
/// Implementations only move bytes. Status interpretation, rate budgeting and
/// retries live in the client built on top of this port.
///
/// # Errors
/// Implementations return an error only when no HTTP response was received
/// (timeout, connection reset, DNS failure).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}
