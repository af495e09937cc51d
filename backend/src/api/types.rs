//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::components::ListingView;
use crate::page::{BusyState, PageSnapshot};
use crate::status::StatusEvent;

/// Body of the sign-up / sign-in endpoints.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Response to every page action.
///
/// `status` is the outcome of this request (none for a plain listing fetch);
/// `listing` and `busy` are the page state after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub request_id: String,
    pub status: Option<StatusEvent>,
    pub listing: ListingView,
    pub busy: BusyState,
}

impl ActionResponse {
    pub fn new(status: Option<StatusEvent>, snapshot: PageSnapshot) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            status,
            listing: snapshot.listing,
            busy: snapshot.busy,
        }
    }
}

/// Create an error response for requests that never reached the page.
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": Uuid::new_v4().to_string(),
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactId;
    use crate::components::ContactRow;
    use crate::status::Operation;

    #[test]
    fn test_action_response_shape() {
        let snapshot = PageSnapshot {
            status: None,
            listing: ListingView {
                rows: vec![ContactRow {
                    id: ContactId::Int(1),
                    name: "Ana".into(),
                    email: "ana@x.com".into(),
                }],
                placeholder: None,
            },
            busy: BusyState {
                session: false,
                import: false,
                refresh: false,
                delete: false,
            },
        };
        let response = ActionResponse::new(
            Some(StatusEvent::success(Operation::Import, "Contacts imported (1).")),
            snapshot,
        );

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["requestId"].is_string());
        assert_eq!(json["status"]["operation"], "import");
        assert_eq!(json["listing"]["rows"][0]["id"], 1);
        assert_eq!(json["listing"]["rows"][0]["name"], "Ana");
        assert_eq!(json["busy"]["delete"], false);
    }

    #[test]
    fn test_error_response() {
        let json = error_response("Multipart error");
        assert_eq!(json["error"], "Multipart error");
    }
}
