use crate::export_generation::domain::SearchFilter;
use crate::shared::Result;
use serde::Deserialize;

/// ExportRequest - Raw filter submission from the search form
///
/// Field names match the HTML form and query string. Values are kept
/// exactly as submitted; validation happens in [`ExportRequest::to_filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_status: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub incorporated_from: Option<String>,
    #[serde(default)]
    pub incorporated_to: Option<String>,
    #[serde(default)]
    pub sic_codes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ExportRequest {
    /// Validates the submission into a [`SearchFilter`]
    ///
    /// # Errors
    /// Returns a validation error when no field is populated or a value is
    /// malformed
    pub fn to_filter(&self) -> Result<SearchFilter> {
        let mut builder = SearchFilter::builder();

        if let Some(v) = &self.company_name {
            builder = builder.name(v.as_str());
        }
        if let Some(v) = &self.company_status {
            builder = builder.status(v.as_str());
        }
        if let Some(v) = &self.company_type {
            builder = builder.company_type(v.as_str());
        }
        if let Some(v) = &self.incorporated_from {
            builder = builder.incorporated_from(v.as_str());
        }
        if let Some(v) = &self.incorporated_to {
            builder = builder.incorporated_to(v.as_str());
        }
        if let Some(v) = &self.sic_codes {
            builder = builder.sic_codes(v.as_str());
        }
        if let Some(v) = &self.location {
            builder = builder.location(v.as_str());
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_rejected() {
        assert!(ExportRequest::default().to_filter().is_err());
    }

    #[test]
    fn test_fields_map_onto_filter() {
        let request = ExportRequest {
            company_status: Some("active".to_string()),
            incorporated_from: Some("2024-01-01".to_string()),
            incorporated_to: Some("2024-12-31".to_string()),
            ..Default::default()
        };
        let filter = request.to_filter().unwrap();
        assert_eq!(filter.status(), Some("active"));
        assert_eq!(
            filter.incorporated_from().map(|d| d.to_string()),
            Some("2024-01-01".to_string())
        );
        assert_eq!(
            filter.incorporated_to().map(|d| d.to_string()),
            Some("2024-12-31".to_string())
        );
    }

    #[test]
    fn test_deserialize_from_json_with_missing_fields() {
        let request: ExportRequest =
            serde_json::from_str(r#"{"company_name": "acme"}"#).unwrap();
        assert_eq!(request.company_name.as_deref(), Some("acme"));
        assert!(request.location.is_none());
    }
}
