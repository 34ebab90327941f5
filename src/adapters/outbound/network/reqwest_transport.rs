use crate::ports::outbound::{ApiRequest, ApiResponse, HttpTransport};
use crate::shared::error::ExportError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

/// Public Companies House REST API
pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ReqwestTransport adapter for the HttpTransport port
///
/// Authenticates with HTTP basic auth: the API key is the user name and the
/// password is empty.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url` using `api_key`
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("registry-export/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

/// Parses a `Retry-After` value given in seconds
///
/// The HTTP-date form is not used by the registry and is ignored.
fn parse_retry_after(value: Option<&header::HeaderValue>) -> Option<u64> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ExportError::Network {
                endpoint: request.path.clone(),
                details: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let retry_after = parse_retry_after(response.headers().get(header::RETRY_AFTER));
        let body = response.text().await.map_err(|e| ExportError::Network {
            endpoint: request.path.clone(),
            details: format!("failed to read response body: {}", e),
        })?;

        Ok(ApiResponse {
            status,
            retry_after,
            body,
        })
    }
}
