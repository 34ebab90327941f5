use serde::Deserialize;

/// Postal address as returned by the registry API
///
/// Only the parts that appear in the export are kept; every part is
/// optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub address_line_2: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Address {
    /// Flattens the address into a single line
    ///
    /// Parts appear in postal order; missing or blank parts are skipped and
    /// the rest joined with `", "`.
    pub fn to_single_line(&self) -> String {
        [
            &self.address_line_1,
            &self.address_line_2,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let address = Address {
            address_line_1: Some("1 High Street".to_string()),
            address_line_2: Some("Unit 4".to_string()),
            locality: Some("Leeds".to_string()),
            region: Some("West Yorkshire".to_string()),
            postal_code: Some("LS1 1AA".to_string()),
            country: Some("England".to_string()),
        };
        assert_eq!(
            address.to_single_line(),
            "1 High Street, Unit 4, Leeds, West Yorkshire, LS1 1AA, England"
        );
    }

    #[test]
    fn test_missing_and_blank_parts_are_skipped() {
        let address = Address {
            address_line_1: Some("1 High Street".to_string()),
            address_line_2: Some("  ".to_string()),
            postal_code: Some("LS1 1AA".to_string()),
            ..Default::default()
        };
        assert_eq!(address.to_single_line(), "1 High Street, LS1 1AA");
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(Address::default().to_single_line(), "");
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"premises": "Floor 2", "locality": "Cardiff", "country": "Wales"}"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.to_single_line(), "Cardiff, Wales");
    }
}
