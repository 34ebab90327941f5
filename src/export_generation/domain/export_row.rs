use super::{CompanyRecord, DirectorRecord};

/// Export column names in their fixed output order
pub const EXPORT_COLUMNS: [&str; 18] = [
    "company_name",
    "company_number",
    "company_status",
    "company_type",
    "company_subtype",
    "dissolution_date",
    "incorporation_date",
    "removed_date",
    "registered_date",
    "nature_of_business",
    "registered_office_address",
    "director_name",
    "director_address",
    "director_nationality",
    "director_occupation",
    "director_role",
    "director_appointed_date",
    "director_resigned_date",
];

const EMPTY_DIRECTOR: [&str; 7] = [""; 7];

/// One flattened output line: a company joined with one of its directors,
/// or with no director at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    company: CompanyRecord,
    director: Option<DirectorRecord>,
}

impl ExportRow {
    pub fn with_director(company: CompanyRecord, director: DirectorRecord) -> Self {
        Self {
            company,
            director: Some(director),
        }
    }

    pub fn without_director(company: CompanyRecord) -> Self {
        Self {
            company,
            director: None,
        }
    }

    pub fn company(&self) -> &CompanyRecord {
        &self.company
    }

    pub fn director(&self) -> Option<&DirectorRecord> {
        self.director.as_ref()
    }

    /// Cell values in [`EXPORT_COLUMNS`] order
    pub fn values(&self) -> Vec<&str> {
        let director = self
            .director
            .as_ref()
            .map(DirectorRecord::fields)
            .unwrap_or(EMPTY_DIRECTOR);

        let mut values = Vec::with_capacity(EXPORT_COLUMNS.len());
        values.extend(self.company.fields());
        values.extend(director);
        values
    }
}
