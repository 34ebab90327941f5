use crate::shared::Result;

/// Maximum length accepted for a single URL path component
pub const MAX_PATH_COMPONENT_LENGTH: usize = 64;

/// Validates a value before it is interpolated into a registry API path
///
/// # Security
/// Company numbers come from upstream JSON and end up in the request path
/// (`/company/{number}/officers`). Rejecting separators and traversal
/// sequences keeps a malformed record from addressing another endpoint.
///
/// # Arguments
/// * `component` - The value to validate
/// * `component_type` - Description of the value for error messages
///
/// # Errors
/// Returns an error if the component is empty, too long, or contains
/// path separators, `..`, or URL-unsafe characters
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("Security: {} must not be empty", component_type);
    }

    if component.len() > MAX_PATH_COMPONENT_LENGTH {
        anyhow::bail!(
            "Security: {} is too long ({} bytes). Maximum allowed: {} bytes",
            component_type,
            component.len(),
            MAX_PATH_COMPONENT_LENGTH
        );
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            component_type
        );
    }

    if component.contains('#') || component.contains('?') || component.contains('@') {
        anyhow::bail!(
            "Security: {} contains URL-unsafe characters",
            component_type
        );
    }

    Ok(())
}
