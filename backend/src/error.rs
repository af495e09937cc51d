//! Error types for the contact book.
//!
//! This module defines one error type per area:
//!
//! - [`SpreadsheetError`] - workbook / delimited text parsing errors
//! - [`ServiceError`] - hosted auth and data service errors
//! - [`ImportError`] - import orchestration errors
//! - [`ConfigError`] - missing service configuration
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Spreadsheet Errors
// =============================================================================

/// Errors while turning uploaded bytes into row records.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook container could not be opened or a sheet could not be read.
    #[error("Invalid workbook: {0}")]
    Workbook(String),

    /// The workbook has no sheet at all.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// Delimited text could not be read.
    #[error("Invalid delimited text: {0}")]
    Delimited(String),
}

impl From<calamine::Error> for SpreadsheetError {
    fn from(err: calamine::Error) -> Self {
        SpreadsheetError::Workbook(err.to_string())
    }
}

impl From<csv::Error> for SpreadsheetError {
    fn from(err: csv::Error) -> Self {
        SpreadsheetError::Delimited(err.to_string())
    }
}

// =============================================================================
// Service Errors
// =============================================================================

/// Errors from the hosted auth / data service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be made or no response came back.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with an application error.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service answered with a success status but an unreadable body.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Build an application error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors during a spreadsheet import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Nothing was selected.
    #[error("No file selected")]
    NoFile,

    /// The file could not be parsed.
    #[error("Could not read spreadsheet: {0}")]
    Parse(#[from] SpreadsheetError),

    /// The bulk insert was rejected or never reached the service.
    #[error("Insert failed: {0}")]
    Insert(#[from] ServiceError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Service URL not provided.
    #[error("Missing SUPABASE_URL environment variable")]
    MissingUrl,

    /// Service key not provided.
    #[error("Missing SUPABASE_KEY environment variable")]
    MissingKey,

    /// The URL does not parse.
    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for spreadsheet parsing.
pub type SpreadsheetResult<T> = Result<T, SpreadsheetError>;

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type for imports.
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let parse_err = SpreadsheetError::NoSheets;
        let import_err: ImportError = parse_err.into();
        assert!(import_err.to_string().contains("no sheets"));

        let service_err = ServiceError::api(409, "duplicate key value");
        let import_err: ImportError = service_err.into();
        assert_eq!(import_err.to_string(), "Insert failed: duplicate key value");
    }

    #[test]
    fn test_api_error_displays_service_message_only() {
        let err = ServiceError::api(400, "Invalid login credentials");
        assert_eq!(err.to_string(), "Invalid login credentials");
    }
}
