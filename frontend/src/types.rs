//! Common types used across the frontend application.
//!
//! Mirrors the JSON the backend sends, plus the frontend-only log and
//! request bookkeeping types.
//!
//! # Categories
//!
//! - **Status Types** - Outcome of a page operation
//! - **Listing Types** - Rendered contact list
//! - **API Types** - Backend response structures
//! - **Log Types** - Activity log entries
//! - **Request Types** - Stale response guard
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Status Types
// =============================================================================

/// Severity of a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "status-info",
            StatusLevel::Success => "status-success",
            StatusLevel::Warning => "status-warning",
            StatusLevel::Error => "status-error",
        }
    }

    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            StatusLevel::Info => "ℹ️",
            StatusLevel::Success => "✅",
            StatusLevel::Warning => "⚠️",
            StatusLevel::Error => "❌",
        }
    }
}

/// Page operation that produced a status event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SignUp,
    SignIn,
    Import,
    Refresh,
    Delete,
}

/// Outcome of one operation, as reported by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub operation: Operation,
    pub message: String,
    /// RFC 3339 timestamp
    pub at: String,
}

impl StatusEvent {
    /// Status produced in the browser, without a round trip.
    pub fn local(level: StatusLevel, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level,
            operation,
            message: message.into(),
            at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// =============================================================================
// Listing Types
// =============================================================================

/// Contact identifier: integer or text, depending on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Int(id) => write!(f, "{}", id),
            ContactId::Text(id) => f.write_str(id),
        }
    }
}

/// One line of the contact list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactRow {
    pub id: ContactId,
    pub name: String,
    pub email: String,
}

/// The rendered listing: rows, or a placeholder when there are none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingView {
    pub rows: Vec<ContactRow>,
    pub placeholder: Option<String>,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Which operations the backend has in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyState {
    pub session: bool,
    pub import: bool,
    pub refresh: bool,
    pub delete: bool,
}

/// Response to every page action.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub request_id: String,
    /// Outcome of this request; none for a plain listing fetch
    pub status: Option<StatusEvent>,
    pub listing: ListingView,
    pub busy: BusyState,
}

// =============================================================================
// Log Types
// =============================================================================

/// A single activity log entry.
///
/// Built from status events received over SSE (`/api/status`) and from
/// frontend-side failures.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub level: StatusLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl LogEntry {
    pub fn now(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

impl From<&StatusEvent> for LogEntry {
    fn from(event: &StatusEvent) -> Self {
        let timestamp = chrono::DateTime::parse_from_rfc3339(&event.at)
            .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| chrono::Local::now().format("%H:%M:%S").to_string());

        Self {
            level: event.level,
            message: event.message.clone(),
            timestamp,
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Hands out increasing ticket numbers to listing requests.
///
/// A response may only replace the listing if its ticket is still the
/// latest one handed out. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
    latest: Rc<Cell<u64>>,
}

impl RequestSequence {
    pub fn next(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Request never got a response.
    Network(String),
    /// Backend answered with a non-success status.
    Server { status: u16, message: String },
    /// Response body could not be decoded.
    Decode(String),
    /// Input rejected before sending.
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            AppError::Validation(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_event_deserialization() {
        let json = r#"{
            "level": "warning",
            "operation": "sign_in",
            "message": "Invalid login credentials",
            "at": "2026-03-01T10:15:00+00:00"
        }"#;

        let event: StatusEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.level, StatusLevel::Warning);
        assert_eq!(event.operation, Operation::SignIn);
        assert_eq!(event.level.css_class(), "status-warning");
    }

    #[test]
    fn test_contact_id_forms() {
        let rows: Vec<ContactRow> = serde_json::from_str(
            r#"[
                {"id": 7, "name": "Ana", "email": "ana@x.com"},
                {"id": "9b2f", "name": "Leo", "email": "leo@x.com"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].id, ContactId::Int(7));
        assert_eq!(rows[1].id.to_string(), "9b2f");
    }

    #[test]
    fn test_log_entry_from_event() {
        let event = StatusEvent::local(StatusLevel::Error, Operation::Refresh, "offline");
        let entry = LogEntry::from(&event);

        assert_eq!(entry.level, StatusLevel::Error);
        assert_eq!(entry.message, "offline");
        assert_eq!(entry.timestamp.len(), 8);
    }

    #[test]
    fn test_request_sequence_only_latest_applies() {
        let sequence = RequestSequence::default();
        let first = sequence.next();
        let second = sequence.clone().next();

        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Server {
            status: 413,
            message: "length limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "Server error (413): length limit exceeded");
        assert_eq!(
            AppError::Validation("File too large".into()).to_string(),
            "File too large"
        );
    }
}
