use crate::shared::error::ExportError;
use crate::shared::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Date format accepted for incorporation bounds (HTML `<input type="date">`)
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of any free-text filter value
const MAX_TEXT_LENGTH: usize = 160;

/// Validated company search criteria
///
/// A `SearchFilter` always has at least one populated field; the only way to
/// obtain one is through [`SearchFilterBuilder::build`], which rejects empty
/// criteria before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    name: Option<String>,
    status: Option<String>,
    company_type: Option<String>,
    incorporated_from: Option<NaiveDate>,
    incorporated_to: Option<NaiveDate>,
    sic_codes: BTreeSet<String>,
    location: Option<String>,
}

impl SearchFilter {
    pub fn builder() -> SearchFilterBuilder {
        SearchFilterBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn company_type(&self) -> Option<&str> {
        self.company_type.as_deref()
    }

    pub fn incorporated_from(&self) -> Option<NaiveDate> {
        self.incorporated_from
    }

    pub fn incorporated_to(&self) -> Option<NaiveDate> {
        self.incorporated_to
    }

    pub fn sic_codes(&self) -> &BTreeSet<String> {
        &self.sic_codes
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Translates the filter into advanced-search query parameters
    ///
    /// Dates are ISO formatted, SIC codes comma-joined, and the name is
    /// passed through untouched for partial matching. Paging parameters are
    /// not included.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(name) = &self.name {
            params.push(("company_name_includes".to_string(), name.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("company_status".to_string(), status.clone()));
        }
        if let Some(company_type) = &self.company_type {
            params.push(("company_type".to_string(), company_type.clone()));
        }
        if let Some(from) = self.incorporated_from {
            params.push((
                "incorporated_from".to_string(),
                from.format(DATE_FORMAT).to_string(),
            ));
        }
        if let Some(to) = self.incorporated_to {
            params.push((
                "incorporated_to".to_string(),
                to.format(DATE_FORMAT).to_string(),
            ));
        }
        if !self.sic_codes.is_empty() {
            let joined = self
                .sic_codes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("sic_codes".to_string(), joined));
        }
        if let Some(location) = &self.location {
            params.push(("location".to_string(), location.clone()));
        }

        params
    }
}

/// Builder collecting raw, user-supplied filter values
///
/// Every setter accepts the raw string as submitted; trimming, blank
/// detection, and parsing happen in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SearchFilterBuilder {
    name: Option<String>,
    status: Option<String>,
    company_type: Option<String>,
    incorporated_from: Option<String>,
    incorporated_to: Option<String>,
    sic_codes: Option<String>,
    location: Option<String>,
}

impl SearchFilterBuilder {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn company_type(mut self, value: impl Into<String>) -> Self {
        self.company_type = Some(value.into());
        self
    }

    pub fn incorporated_from(mut self, value: impl Into<String>) -> Self {
        self.incorporated_from = Some(value.into());
        self
    }

    pub fn incorporated_to(mut self, value: impl Into<String>) -> Self {
        self.incorporated_to = Some(value.into());
        self
    }

    /// SIC codes separated by commas and/or whitespace
    pub fn sic_codes(mut self, value: impl Into<String>) -> Self {
        self.sic_codes = Some(value.into());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    /// Validates the collected values into a [`SearchFilter`]
    ///
    /// # Errors
    /// Returns [`ExportError::Validation`] when every field is blank, a date
    /// is not `YYYY-MM-DD`, the date range is inverted, a SIC code is not
    /// 4-5 digits, or a text value is unreasonably long.
    pub fn build(self) -> Result<SearchFilter> {
        let name = normalize_text(self.name, "company_name")?;
        let status = normalize_text(self.status, "company_status")?;
        let company_type = normalize_text(self.company_type, "company_type")?;
        let location = normalize_text(self.location, "location")?;
        let incorporated_from = parse_date(self.incorporated_from, "incorporated_from")?;
        let incorporated_to = parse_date(self.incorporated_to, "incorporated_to")?;
        let sic_codes = parse_sic_codes(self.sic_codes)?;

        if let (Some(from), Some(to)) = (incorporated_from, incorporated_to) {
            if from > to {
                return Err(ExportError::validation(format!(
                    "incorporated_from ({}) must not be after incorporated_to ({})",
                    from, to
                ))
                .into());
            }
        }

        let filter = SearchFilter {
            name,
            status,
            company_type,
            incorporated_from,
            incorporated_to,
            sic_codes,
            location,
        };

        let is_empty = filter.name.is_none()
            && filter.status.is_none()
            && filter.company_type.is_none()
            && filter.incorporated_from.is_none()
            && filter.incorporated_to.is_none()
            && filter.sic_codes.is_empty()
            && filter.location.is_none();

        if is_empty {
            return Err(
                ExportError::validation("Please provide at least one search filter").into(),
            );
        }

        Ok(filter)
    }
}

fn normalize_text(value: Option<String>, field: &str) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(ExportError::validation(format!(
            "{} is too long (maximum {} characters)",
            field, MAX_TEXT_LENGTH
        ))
        .into());
    }

    Ok(Some(trimmed.to_string()))
}

fn parse_date(value: Option<String>, field: &str) -> Result<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            ExportError::validation(format!(
                "{} must be a date in YYYY-MM-DD format, got '{}'",
                field, trimmed
            ))
            .into()
        })
}

fn parse_sic_codes(value: Option<String>) -> Result<BTreeSet<String>> {
    let Some(value) = value else {
        return Ok(BTreeSet::new());
    };

    let mut codes = BTreeSet::new();
    for code in value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|code| !code.is_empty())
    {
        let valid = (4..=5).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(ExportError::validation(format!(
                "SIC code '{}' must be 4 or 5 digits",
                code
            ))
            .into());
        }
        codes.insert(code.to_string());
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(result: Result<SearchFilter>) -> String {
        let err = result.unwrap_err();
        match err.downcast_ref::<ExportError>() {
            Some(ExportError::Validation { message }) => message.clone(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_builder_is_rejected() {
        let message = validation_message(SearchFilter::builder().build());
        assert!(message.contains("at least one search filter"));
    }

    #[test]
    fn test_blank_values_count_as_empty() {
        let result = SearchFilter::builder()
            .name("   ")
            .status("")
            .sic_codes(" , ")
            .incorporated_from(" ")
            .build();
        let message = validation_message(result);
        assert!(message.contains("at least one search filter"));
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let filter = SearchFilter::builder()
            .name("  Acme Widgets ")
            .location(" London ")
            .build()
            .unwrap();
        assert_eq!(filter.name(), Some("Acme Widgets"));
        assert_eq!(filter.location(), Some("London"));
        assert_eq!(filter.status(), None);
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let message = validation_message(
            SearchFilter::builder()
                .incorporated_from("01/02/2024")
                .build(),
        );
        assert!(message.contains("incorporated_from"));
        assert!(message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_inverted_date_range_is_rejected() {
        let message = validation_message(
            SearchFilter::builder()
                .incorporated_from("2024-12-31")
                .incorporated_to("2024-01-01")
                .build(),
        );
        assert!(message.contains("must not be after"));
    }

    #[test]
    fn test_sic_codes_accept_commas_and_spaces() {
        let filter = SearchFilter::builder()
            .sic_codes("62020, 62012 6201,62020")
            .build()
            .unwrap();
        let codes: Vec<&str> = filter.sic_codes().iter().map(String::as_str).collect();
        assert_eq!(codes, vec!["6201", "62012", "62020"]);
    }

    #[test]
    fn test_invalid_sic_code_is_rejected() {
        let message = validation_message(SearchFilter::builder().sic_codes("62020,abc").build());
        assert!(message.contains("'abc'"));

        let message = validation_message(SearchFilter::builder().sic_codes("123456").build());
        assert!(message.contains("'123456'"));
    }

    #[test]
    fn test_overlong_text_is_rejected() {
        let message = validation_message(SearchFilter::builder().name("x".repeat(200)).build());
        assert!(message.contains("company_name is too long"));
    }

    #[test]
    fn test_query_params_full_filter() {
        let filter = SearchFilter::builder()
            .name("acme")
            .status("active")
            .company_type("ltd")
            .incorporated_from("2024-01-01")
            .incorporated_to("2024-12-31")
            .sic_codes("62020 62012")
            .location("Leeds")
            .build()
            .unwrap();

        let params = filter.to_query_params();
        assert_eq!(
            params,
            vec![
                ("company_name_includes".to_string(), "acme".to_string()),
                ("company_status".to_string(), "active".to_string()),
                ("company_type".to_string(), "ltd".to_string()),
                ("incorporated_from".to_string(), "2024-01-01".to_string()),
                ("incorporated_to".to_string(), "2024-12-31".to_string()),
                ("sic_codes".to_string(), "62012,62020".to_string()),
                ("location".to_string(), "Leeds".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_only_include_populated_fields() {
        let filter = SearchFilter::builder().status("dissolved").build().unwrap();
        assert_eq!(
            filter.to_query_params(),
            vec![("company_status".to_string(), "dissolved".to_string())]
        );
    }
}
