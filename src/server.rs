//! Wiring of adapters into the running HTTP server.

use std::sync::Arc;

use crate::adapters::inbound::web::{router, AppState};
use crate::adapters::outbound::console::TracingProgressReporter;
use crate::adapters::outbound::formatters::CsvFormatter;
use crate::adapters::outbound::network::{
    CompaniesHouseOfficers, CompaniesHouseSearch, RateLimitedClient, ReqwestTransport,
};
use crate::application::use_cases::ExportCompaniesUseCase;
use crate::config::AppConfig;
use crate::export_generation::policies::RateBudget;
use crate::ports::inbound::CompanyExportPort;
use crate::shared::Result;
use anyhow::Context;

/// Builds the export use case for `config` (Dependency Injection)
///
/// Search and officer lookups share one client, and with it one
/// [`RateBudget`], so every request made with the API key counts against the
/// same limit.
pub fn build_exporter(config: &AppConfig) -> Result<Arc<dyn CompanyExportPort>> {
    let transport = ReqwestTransport::new(&config.base_url, &config.api_key, config.request_timeout)?;
    let budget = Arc::new(RateBudget::new(config.rate_limit));
    let client = Arc::new(
        RateLimitedClient::new(transport, budget).with_retry_backoff(config.retry_backoff),
    );

    let search = CompaniesHouseSearch::new(Arc::clone(&client))
        .with_page_size(config.page_size)
        .with_max_results(config.max_results);
    let officers = CompaniesHouseOfficers::new(client);

    Ok(Arc::new(ExportCompaniesUseCase::new(
        search,
        officers,
        CsvFormatter::new(),
        TracingProgressReporter::new(),
    )))
}

/// Builds the shared handler state for `config`
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    Ok(AppState {
        exporter: build_exporter(config)?,
        api_key_configured: !config.api_key.is_empty(),
        debug: config.debug,
    })
}

/// Binds the listener and serves until Ctrl-C
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(config: AppConfig) -> Result<()> {
    let app = router(build_state(&config)?);
    let address = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}\n\n💡 Hint: Choose another port with --port or PORT",
                address
            )
        })?;

    tracing::info!(
        address = %address,
        base_url = %config.base_url,
        max_results = config.max_results,
        rate_limit = config.rate_limit.max_requests,
        rate_window_secs = config.rate_limit.window.as_secs(),
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
