use crate::export_generation::domain::{CompanyRecord, DirectorRecord, ExportRow};
use std::collections::HashMap;

/// RowMerger flattens companies and their officers into export rows
///
/// Pure function of its inputs: no sorting, no deduplication. Companies keep
/// discovery order and each company's directors keep the order the registry
/// listed them in.
pub struct RowMerger;

impl RowMerger {
    /// Joins every company with its directors
    ///
    /// # Arguments
    /// * `companies` - Companies in discovery order
    /// * `officers_by_company` - Directors keyed by company number
    ///
    /// # Returns
    /// One row per director, or a single director-less row for a company with
    /// no entry (or an empty entry) in `officers_by_company`
    pub fn merge(
        companies: &[CompanyRecord],
        officers_by_company: &HashMap<String, Vec<DirectorRecord>>,
    ) -> Vec<ExportRow> {
        let mut rows = Vec::with_capacity(companies.len());

        for company in companies {
            match officers_by_company.get(&company.company_number) {
                Some(directors) if !directors.is_empty() => {
                    rows.extend(
                        directors
                            .iter()
                            .map(|d| ExportRow::with_director(company.clone(), d.clone())),
                    );
                }
                _ => rows.push(ExportRow::without_director(company.clone())),
            }
        }

        rows
    }
}
