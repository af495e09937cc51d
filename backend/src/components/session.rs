//! Sign-up and sign-in.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::Credentials;
use crate::service::AuthService;
use crate::status::{Operation, StatusEvent, StatusReporter};

use super::BusyFlag;

pub const SIGN_UP_MESSAGE: &str = "Sign-up successful. Check your email to confirm your account.";
pub const SIGN_IN_MESSAGE: &str = "Signed in successfully.";

/// Shown when the request never got an answer from the service.
pub const AUTH_UNAVAILABLE_MESSAGE: &str =
    "Could not reach the authentication service. Please try again.";

/// Sends credentials to the auth service and reports the outcome.
///
/// No retry, no local validation, no guard against overlapping calls: the last
/// one to finish owns the status line.
pub struct SessionComponent {
    auth: Arc<dyn AuthService>,
    reporter: Arc<StatusReporter>,
    busy: BusyFlag,
}

impl SessionComponent {
    pub fn new(auth: Arc<dyn AuthService>, reporter: Arc<StatusReporter>) -> Self {
        Self {
            auth,
            reporter,
            busy: BusyFlag::default(),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> StatusEvent {
        let _busy = self.busy.enter();
        let result = self.auth.sign_up(&Credentials::new(email, password)).await;

        let event = match result {
            Ok(()) => StatusEvent::info(Operation::SignUp, SIGN_UP_MESSAGE),
            Err(err) => StatusEvent::error(Operation::SignUp, failure_message(&err)),
        };
        self.reporter.report(event.clone());
        event
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> StatusEvent {
        let _busy = self.busy.enter();
        let result = self.auth.sign_in(&Credentials::new(email, password)).await;

        let event = match result {
            Ok(_) => StatusEvent::success(Operation::SignIn, SIGN_IN_MESSAGE),
            Err(err) => StatusEvent::error(Operation::SignIn, failure_message(&err)),
        };
        self.reporter.report(event.clone());
        event
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }
}

/// The service's own message when it gave one, a generic one otherwise.
fn failure_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Api { message, .. } => message.clone(),
        ServiceError::Transport(_) | ServiceError::Decode(_) => {
            AUTH_UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthSession;
    use crate::service::MemoryService;
    use crate::status::StatusLevel;
    use async_trait::async_trait;

    fn session(auth: Arc<dyn AuthService>) -> (SessionComponent, Arc<StatusReporter>) {
        let reporter = Arc::new(StatusReporter::quiet());
        (SessionComponent::new(auth, reporter.clone()), reporter)
    }

    struct Offline;

    #[async_trait]
    impl AuthService for Offline {
        async fn sign_up(&self, _: &Credentials) -> crate::error::ServiceResult<()> {
            Err(ServiceError::Transport("connection refused".into()))
        }

        async fn sign_in(&self, _: &Credentials) -> crate::error::ServiceResult<AuthSession> {
            Err(ServiceError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_succeeds() {
        let (session, reporter) = session(Arc::new(MemoryService::new()));

        let up = session.sign_up("ana@x.com", "secret1").await;
        assert_eq!(up.level, StatusLevel::Info);
        assert_eq!(up.message, SIGN_UP_MESSAGE);

        let signed_in = session.sign_in("ana@x.com", "secret1").await;
        assert_eq!(signed_in.level, StatusLevel::Success);
        assert_eq!(reporter.current().unwrap().message, SIGN_IN_MESSAGE);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_service_message_is_surfaced() {
        let (session, reporter) = session(Arc::new(MemoryService::new()));

        let event = session.sign_in("nobody@x.com", "secret1").await;

        assert_eq!(event.level, StatusLevel::Error);
        assert_eq!(event.message, "Invalid login credentials");
        assert_eq!(reporter.current().unwrap(), event);
    }

    #[tokio::test]
    async fn test_transport_failure_gets_generic_message() {
        let (session, _) = session(Arc::new(Offline));

        let up = session.sign_up("ana@x.com", "secret1").await;
        let signed_in = session.sign_in("ana@x.com", "secret1").await;

        assert_eq!(up.message, AUTH_UNAVAILABLE_MESSAGE);
        assert_eq!(signed_in.message, AUTH_UNAVAILABLE_MESSAGE);
        assert_eq!(signed_in.operation, Operation::SignIn);
    }
}
