/// A company as discovered through the registry search
///
/// Fields hold the registry values verbatim; anything the registry omitted
/// is an empty string so every record has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRecord {
    pub company_name: String,
    pub company_number: String,
    pub company_status: String,
    pub company_type: String,
    pub company_subtype: String,
    pub dissolution_date: String,
    pub incorporation_date: String,
    pub removed_date: String,
    pub registered_date: String,
    /// SIC codes joined with single spaces
    pub nature_of_business: String,
    /// Registered office flattened to a single line
    pub registered_office_address: String,
}

impl CompanyRecord {
    /// Company fields in export column order
    pub fn fields(&self) -> [&str; 11] {
        [
            &self.company_name,
            &self.company_number,
            &self.company_status,
            &self.company_type,
            &self.company_subtype,
            &self.dissolution_date,
            &self.incorporation_date,
            &self.removed_date,
            &self.registered_date,
            &self.nature_of_business,
            &self.registered_office_address,
        ]
    }
}
