//! Application configuration.
//!
//! Compile-time constants for the Contactbook frontend.

/// Backend API base URL (`contactbook serve`).
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name, shown in the header and the page title.
pub const APP_NAME: &str = "Contactbook";

/// Maximum file size for import (in bytes).
///
/// Matches the backend upload limit (50 MB).
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// File types offered by the import picker.
pub const ACCEPTED_FILE_TYPES: &str = ".xlsx,.xls,.xlsm,.ods,.csv";
