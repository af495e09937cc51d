//! Operation outcomes, reported through one channel.
//!
//! Every operation (sign-up, sign-in, import, refresh, delete) ends by
//! reporting a [`StatusEvent`]. The reporter prints it, keeps the latest
//! user-facing one for the page's status line, and broadcasts all of them so
//! the HTTP layer can stream them to clients over SSE.
//!
//! Refresh failures are reported like everything else but never replace the
//! status line; what to show is left to the UI.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tokio::sync::broadcast;

/// Severity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// The operation an event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SignUp,
    SignIn,
    Import,
    Refresh,
    Delete,
}

impl Operation {
    /// Whether outcomes of this operation belong on the status line.
    pub fn is_user_facing(self) -> bool {
        !matches!(self, Operation::Refresh)
    }
}

/// One reported outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub operation: Operation,
    pub message: String,
    /// RFC 3339 timestamp
    pub at: String,
}

impl StatusEvent {
    pub fn new(level: StatusLevel, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level,
            operation,
            message: message.into(),
            at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn info(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, operation, message)
    }

    pub fn success(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, operation, message)
    }

    pub fn warning(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, operation, message)
    }

    pub fn error(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, operation, message)
    }
}

/// Broadcasts status events and remembers the current status line.
pub struct StatusReporter {
    sender: broadcast::Sender<StatusEvent>,
    current: RwLock<Option<StatusEvent>>,
    echo: bool,
}

impl StatusReporter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self {
            sender,
            current: RwLock::new(None),
            echo: true,
        }
    }

    /// A reporter that does not print to stdout.
    pub fn quiet() -> Self {
        Self {
            echo: false,
            ..Self::new()
        }
    }

    /// Report an outcome.
    pub fn report(&self, event: StatusEvent) {
        if self.echo {
            let prefix = match event.level {
                StatusLevel::Info => "   ",
                StatusLevel::Success => "   ✓",
                StatusLevel::Warning => "   ⚠️",
                StatusLevel::Error => "   ❌",
            };
            println!("{} [{:?}] {}", prefix, event.operation, event.message);
        }

        if event.operation.is_user_facing() {
            if let Ok(mut current) = self.current.write() {
                *current = Some(event.clone());
            }
        }

        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    /// The status line: latest outcome of a user-initiated operation.
    pub fn current(&self) -> Option<StatusEvent> {
        self.current.read().ok().and_then(|current| current.clone())
    }

    /// Get a receiver for streaming
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_tracks_latest_user_facing_event() {
        let reporter = StatusReporter::quiet();
        assert!(reporter.current().is_none());

        reporter.report(StatusEvent::success(Operation::SignIn, "Signed in successfully."));
        reporter.report(StatusEvent::error(Operation::Refresh, "connection refused"));

        let current = reporter.current().unwrap();
        assert_eq!(current.operation, Operation::SignIn);
        assert_eq!(current.message, "Signed in successfully.");
    }

    #[test]
    fn test_subscribers_see_every_event() {
        let reporter = StatusReporter::quiet();
        let mut rx = reporter.subscribe();

        reporter.report(StatusEvent::error(Operation::Refresh, "timeout"));
        reporter.report(StatusEvent::info(Operation::SignUp, "check your email"));

        assert_eq!(rx.try_recv().unwrap().operation, Operation::Refresh);
        assert_eq!(rx.try_recv().unwrap().operation, Operation::SignUp);
    }

    #[test]
    fn test_event_serialization() {
        let event = StatusEvent::warning(Operation::Import, "no file");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["level"], "warning");
        assert_eq!(json["operation"], "import");
        assert_eq!(json["message"], "no file");
        assert!(json["at"].is_string());
    }
}
