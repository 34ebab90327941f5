use std::fmt;
use thiserror::Error;

/// Exit codes for the server binary.
///
/// Lets process supervisors tell a misconfigured deployment apart from a
/// runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean shutdown
    Success = 0,
    /// Missing or invalid configuration (API key, config file, flags)
    InvalidConfiguration = 2,
    /// Runtime error (socket bind failure, server error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching the error that stopped the process
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ExportError>() {
            Some(ExportError::InvalidConfiguration { .. }) => ExitCode::InvalidConfiguration,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidConfiguration => write!(f, "Invalid Configuration (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while validating, fetching, and exporting registry data.
///
/// Travels inside `anyhow::Error`; adapters downcast to pick a response.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Registry API rejected the API key (HTTP 401)\n\n💡 Hint: Check that COMPANIES_HOUSE_API_KEY holds a valid REST API key")]
    Authentication,

    #[error("Registry API resource not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("Registry API rate limit exhausted for {endpoint} (retry after {retry_after:?} seconds)")]
    RateLimited {
        endpoint: String,
        retry_after: Option<u64>,
    },

    #[error("Registry API returned HTTP {status} for {endpoint}: {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Network error calling {endpoint}: {details}")]
    Network { endpoint: String, details: String },

    #[error("Invalid response from {endpoint}: {details}")]
    InvalidResponse { endpoint: String, details: String },

    #[error("No companies found matching your criteria")]
    NoCompaniesFound,

    #[error("Failed to write CSV export: {details}")]
    CsvWrite { details: String },

    #[error("Invalid configuration: {reason}\n\n💡 Hint: {hint}")]
    InvalidConfiguration { reason: String, hint: String },
}

impl ExportError {
    pub fn validation(message: impl Into<String>) -> Self {
        ExportError::Validation {
            message: message.into(),
        }
    }

    /// HTTP status of the upstream response that caused this error, if any
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ExportError::Authentication => Some(401),
            ExportError::NotFound { .. } => Some(404),
            ExportError::RateLimited { .. } => Some(429),
            ExportError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
