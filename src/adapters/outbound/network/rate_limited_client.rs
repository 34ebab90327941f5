use crate::export_generation::policies::RateBudget;
use crate::ports::outbound::{ApiRequest, ApiResponse, HttpTransport, RegistryApi};
use crate::shared::error::ExportError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Backoff used when a 429 response carries no usable `Retry-After`
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(60);

/// Upper bound on how much of an error body is kept in `Upstream` errors
const MAX_ERROR_BODY_CHARS: usize = 500;

/// RateLimitedClient adapter implementing the RegistryApi port
///
/// Every outbound call first takes a slot from the shared [`RateBudget`],
/// sleeping until one frees up when none is left. An HTTP 429 from the
/// registry is retried exactly once after the `Retry-After` delay (or
/// [`DEFAULT_RETRY_BACKOFF`]); the retry takes its own budget slot.
pub struct RateLimitedClient<T: HttpTransport> {
    transport: T,
    budget: Arc<RateBudget>,
    retry_backoff: Duration,
}

impl<T: HttpTransport> RateLimitedClient<T> {
    pub fn new(transport: T, budget: Arc<RateBudget>) -> Self {
        Self {
            transport,
            budget,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Overrides the backoff used for 429 responses without `Retry-After`
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn budget(&self) -> &Arc<RateBudget> {
        &self.budget
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send_within_budget(&self, request: &ApiRequest) -> Result<ApiResponse> {
        if let Err(wait) = self.budget.acquire().await {
            return Err(ExportError::RateLimited {
                endpoint: request.path.clone(),
                retry_after: Some(wait.as_secs().max(1)),
            }
            .into());
        }

        tracing::debug!(
            endpoint = %request.path,
            used = self.budget.used(),
            "Calling registry API"
        );
        self.transport.send(request).await
    }

    fn interpret(endpoint: &str, response: ApiResponse) -> Result<serde_json::Value> {
        match response.status {
            _ if response.is_success() => serde_json::from_str::<serde_json::Value>(&response.body)
                .map_err(|e| {
                    ExportError::InvalidResponse {
                        endpoint: endpoint.to_string(),
                        details: e.to_string(),
                    }
                    .into()
                }),
            401 => Err(ExportError::Authentication.into()),
            404 => Err(ExportError::NotFound {
                endpoint: endpoint.to_string(),
            }
            .into()),
            429 => Err(ExportError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after: response.retry_after,
            }
            .into()),
            status => Err(ExportError::Upstream {
                endpoint: endpoint.to_string(),
                status,
                body: response.body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> RegistryApi for RateLimitedClient<T> {
    async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Result<serde_json::Value> {
        let request = ApiRequest::new(endpoint, params.to_vec());

        let mut response = self.send_within_budget(&request).await?;

        if response.status == 429 {
            let wait = response
                .retry_after
                .map(Duration::from_secs)
                .unwrap_or(self.retry_backoff);
            tracing::warn!(
                endpoint = %endpoint,
                wait_secs = wait.as_secs(),
                "Registry API returned 429, retrying once after backoff"
            );
            tokio::time::sleep(wait).await;

            response = self.send_within_budget(&request).await?;
        }

        Self::interpret(endpoint, response)
    }
}
