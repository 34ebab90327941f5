use super::error_response::ApiError;
use crate::application::dto::{ExportRequest, ExportResponse};
use crate::ports::inbound::CompanyExportPort;
use axum::extract::{Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("index.html");

/// Set to `true` when the search stopped at the result cap
pub const EXPORT_TRUNCATED_HEADER: HeaderName = HeaderName::from_static("x-export-truncated");

/// Number of CSV data rows (header excluded)
pub const EXPORT_ROWS_HEADER: HeaderName = HeaderName::from_static("x-export-rows");

/// Shared state for every request handler
#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<dyn CompanyExportPort>,
    pub api_key_configured: bool,
    pub debug: bool,
}

/// Builds the application router
///
/// # Routes
/// - `GET /` search form
/// - `POST /search` export from a form submission
/// - `GET /search` export from a query string
/// - `GET /health` liveness and configuration check
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search_query).post(search_form))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "api_key_configured": state.api_key_configured,
    }))
}

async fn search_form(State(state): State<AppState>, Form(request): Form<ExportRequest>) -> Response {
    run_export(state, request).await
}

async fn search_query(State(state): State<AppState>, Query(request): Query<ExportRequest>) -> Response {
    run_export(state, request).await
}

async fn run_export(state: AppState, request: ExportRequest) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("export", %request_id);

    async move {
        tracing::info!(?request, "Export requested");
        match state.exporter.export(request).await {
            Ok(response) => {
                tracing::info!(
                    companies = response.company_count,
                    rows = response.row_count,
                    truncated = response.truncated,
                    filename = %response.filename,
                    "Export ready"
                );
                download_response(response)
            }
            Err(e) => ApiError::new(e, state.debug).into_response(),
        }
    }
    .instrument(span)
    .await
}

fn download_response(response: ExportResponse) -> Response {
    let disposition = format!("attachment; filename={}", response.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, response.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (EXPORT_TRUNCATED_HEADER, response.truncated.to_string()),
            (EXPORT_ROWS_HEADER, response.row_count.to_string()),
        ],
        response.content,
    )
        .into_response()
}
