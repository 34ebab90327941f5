use crate::application::dto::{export_filename, ExportRequest, ExportResponse};
use crate::export_generation::domain::{CompanyRecord, DirectorRecord, ExportRun, ExportStage};
use crate::export_generation::services::RowMerger;
use crate::ports::inbound::CompanyExportPort;
use crate::ports::outbound::{CompanySearch, ExportFormatter, OfficerRepository, ProgressReporter};
use crate::shared::error::ExportError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Local;
use std::collections::HashMap;

/// Officer-fetch progress is reported every this many companies
const PROGRESS_INTERVAL: usize = 10;

/// ExportCompaniesUseCase - Core use case for the company export
///
/// Runs validation, search, officer lookups and CSV writing strictly in
/// sequence, threading an explicit [`ExportRun`] through each stage. Any
/// failure aborts the whole export; no partial CSV is ever produced.
///
/// # Type Parameters
/// * `S` - CompanySearch implementation
/// * `O` - OfficerRepository implementation
/// * `F` - ExportFormatter implementation
/// * `PR` - ProgressReporter implementation
pub struct ExportCompaniesUseCase<S, O, F, PR> {
    company_search: S,
    officer_repository: O,
    formatter: F,
    progress_reporter: PR,
}

impl<S, O, F, PR> ExportCompaniesUseCase<S, O, F, PR>
where
    S: CompanySearch,
    O: OfficerRepository,
    F: ExportFormatter,
    PR: ProgressReporter,
{
    /// Creates a new ExportCompaniesUseCase with injected dependencies
    pub fn new(company_search: S, officer_repository: O, formatter: F, progress_reporter: PR) -> Self {
        Self {
            company_search,
            officer_repository,
            formatter,
            progress_reporter,
        }
    }

    /// Executes the export with a fresh [`ExportRun`]
    pub async fn execute(&self, request: ExportRequest) -> Result<ExportResponse> {
        let mut run = ExportRun::new();
        self.execute_with_run(request, &mut run).await
    }

    /// Executes the export, recording every stage in `run`
    ///
    /// On error `run` is left in the `Failed` state naming the stage that
    /// failed.
    pub async fn execute_with_run(
        &self,
        request: ExportRequest,
        run: &mut ExportRun,
    ) -> Result<ExportResponse> {
        match self.run_stages(request, run).await {
            Ok(response) => Ok(response),
            Err(e) => {
                self.progress_reporter
                    .report_error(&format!("⚠️  Export aborted: {}", e));
                run.fail(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_stages(&self, request: ExportRequest, run: &mut ExportRun) -> Result<ExportResponse> {
        // Step 1: Validate filters
        run.advance(ExportStage::Validating)?;
        let filter = request.to_filter()?;

        // Step 2: Search companies
        run.advance(ExportStage::Searching)?;
        self.progress_reporter.report("🔍 Searching registry for companies...");

        let outcome = self.company_search.search(&filter).await?;
        if outcome.companies.is_empty() {
            return Err(ExportError::NoCompaniesFound.into());
        }

        self.progress_reporter.report(&format!(
            "✅ Found {} compan{} (registry reported {})",
            outcome.companies.len(),
            if outcome.companies.len() == 1 { "y" } else { "ies" },
            outcome.total_available
        ));
        if outcome.truncated {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Result cap reached, exporting {} of {} companies",
                outcome.companies.len(),
                outcome.total_available
            ));
        }

        // Step 3: Fetch officers, one company at a time
        run.advance(ExportStage::FetchingOfficers)?;
        let officers = self.fetch_all_officers(&outcome.companies).await?;

        // Step 4: Merge and write
        run.advance(ExportStage::Writing)?;
        let rows = RowMerger::merge(&outcome.companies, &officers);
        let content = self.formatter.format(&rows)?;

        run.advance(ExportStage::Done)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Export complete: {} row(s) for {} compan{}",
            rows.len(),
            outcome.companies.len(),
            if outcome.companies.len() == 1 { "y" } else { "ies" }
        ));

        Ok(ExportResponse {
            filename: export_filename(Local::now(), self.formatter.file_extension()),
            content_type: self.formatter.content_type(),
            content,
            company_count: outcome.companies.len(),
            row_count: rows.len(),
            truncated: outcome.truncated,
        })
    }

    async fn fetch_all_officers(
        &self,
        companies: &[CompanyRecord],
    ) -> Result<HashMap<String, Vec<DirectorRecord>>> {
        let total = companies.len();
        let mut officers = HashMap::with_capacity(total);

        for (idx, company) in companies.iter().enumerate() {
            // Repeated numbers reuse the first fetch but still count as processed
            if !officers.contains_key(&company.company_number) {
                let directors = self
                    .officer_repository
                    .fetch_officers(&company.company_number)
                    .await?;
                officers.insert(company.company_number.clone(), directors);
            }

            let processed = idx + 1;
            if processed % PROGRESS_INTERVAL == 0 || processed == total {
                self.progress_reporter
                    .report_progress(processed, total, Some(&company.company_name));
            }
        }

        Ok(officers)
    }
}

#[async_trait]
impl<S, O, F, PR> CompanyExportPort for ExportCompaniesUseCase<S, O, F, PR>
where
    S: CompanySearch,
    O: OfficerRepository,
    F: ExportFormatter,
    PR: ProgressReporter,
{
    async fn export(&self, request: ExportRequest) -> Result<ExportResponse> {
        self.execute(request).await
    }
}
