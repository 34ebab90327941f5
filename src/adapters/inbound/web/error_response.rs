use crate::shared::error::ExportError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// A failed export turned into an HTTP response
///
/// The status code is chosen by downcasting to [`ExportError`]:
///
/// | Error | Status |
/// |-------|--------|
/// | Validation | 400 |
/// | NoCompaniesFound | 404 |
/// | Authentication | 500 |
/// | RateLimited | 503 |
/// | Upstream, Network, InvalidResponse | 502 |
/// | anything else | 500 |
///
/// The body is `{"error": "..."}`; in debug mode the full error chain is
/// added under `details`.
#[derive(Debug)]
pub struct ApiError {
    error: anyhow::Error,
    debug: bool,
}

impl ApiError {
    pub fn new(error: anyhow::Error, debug: bool) -> Self {
        Self { error, debug }
    }

    /// Status code and user-facing message for the wrapped error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self.error.downcast_ref::<ExportError>() {
            Some(ExportError::Validation { message }) => (StatusCode::BAD_REQUEST, message.clone()),
            Some(ExportError::NoCompaniesFound) => (
                StatusCode::NOT_FOUND,
                "No companies found matching your criteria".to_string(),
            ),
            Some(ExportError::Authentication) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registry API authentication failed. Check the configured API key.".to_string(),
            ),
            Some(ExportError::RateLimited { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Registry API rate limit exceeded. Please try again later.".to_string(),
            ),
            Some(ExportError::Upstream { status, .. }) => (
                StatusCode::BAD_GATEWAY,
                format!("Registry API request failed with HTTP {}", status),
            ),
            Some(ExportError::Network { .. }) => (
                StatusCode::BAD_GATEWAY,
                "Could not reach the registry API".to_string(),
            ),
            Some(ExportError::InvalidResponse { .. }) => (
                StatusCode::BAD_GATEWAY,
                "Registry API returned an unreadable response".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }

    fn error_chain(&self) -> Vec<String> {
        self.error.chain().map(|e| e.to_string()).collect()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.error, "Export failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self.error, "Export rejected");
        }

        let mut body = json!({ "error": message });
        let export_error = self.error.downcast_ref::<ExportError>();
        if let Some(upstream) = export_error.and_then(ExportError::upstream_status) {
            if status == StatusCode::BAD_GATEWAY {
                body["upstream_status"] = json!(upstream);
            }
        }
        if self.debug {
            body["details"] = json!(self.error_chain());
        }

        let mut response = (status, Json(body)).into_response();
        if let Some(ExportError::RateLimited {
            retry_after: Some(secs),
            ..
        }) = export_error
        {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
