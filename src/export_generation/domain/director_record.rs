/// An officer listed against a company
///
/// Belongs to exactly one company, identified by `company_number`. Absent
/// registry fields are normalized to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorRecord {
    pub company_number: String,
    pub name: String,
    pub address: String,
    pub nationality: String,
    pub occupation: String,
    pub role: String,
    pub appointed_date: String,
    pub resigned_date: String,
}

impl DirectorRecord {
    /// Director fields in export column order
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.name,
            &self.address,
            &self.nationality,
            &self.occupation,
            &self.role,
            &self.appointed_date,
            &self.resigned_date,
        ]
    }
}
