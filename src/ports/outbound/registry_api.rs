use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// RegistryApi port: one rate-budgeted JSON call to the registry
///
/// # Errors
/// Failures are reported as [`ExportError`](crate::shared::error::ExportError)
/// variants wrapped in `anyhow::Error`:
/// - `Authentication` on HTTP 401
/// - `NotFound` on HTTP 404
/// - `RateLimited` when the budget or a repeated 429 cannot be satisfied
/// - `Upstream` for any other non-2xx status
/// - `Network` when no response was received
/// - `InvalidResponse` when the body is not JSON
#[async_trait]
pub trait RegistryApi: Send + Sync {
    async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: RegistryApi + ?Sized> RegistryApi for Arc<T> {
    async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Result<serde_json::Value> {
        (**self).call(endpoint, params).await
    }
}
