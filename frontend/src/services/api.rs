//! HTTP calls to the contactbook backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use web_sys::{File, FormData};

use crate::{ActionResponse, AppError, AppResult, ContactId, BACKEND_URL, MAX_FILE_SIZE};

/// Register email/password.
pub async fn sign_up(email: &str, password: &str) -> AppResult<ActionResponse> {
    post_credentials("/api/auth/signup", email, password).await
}

/// Password sign-in.
pub async fn sign_in(email: &str, password: &str) -> AppResult<ActionResponse> {
    post_credentials("/api/auth/signin", email, password).await
}

/// Upload the selected spreadsheet.
pub async fn import_file(file: File) -> AppResult<ActionResponse> {
    check_file_size(file.size())?;

    let form_data = FormData::new()
        .map_err(|e| AppError::Network(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| AppError::Network(format!("Failed to append file: {:?}", e)))?;

    let request = Request::post(&endpoint("/api/import"))
        .body(form_data)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    read_response(send(request).await?).await
}

/// Refetch the listing.
pub async fn fetch_contacts() -> AppResult<ActionResponse> {
    let response = Request::get(&endpoint("/api/contacts"))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_response(response).await
}

pub async fn delete_contact(id: &ContactId) -> AppResult<ActionResponse> {
    let response = Request::delete(&endpoint(&format!("/api/contacts/{}", id)))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_response(response).await
}

fn endpoint(path: &str) -> String {
    format!("{}{}", BACKEND_URL, path)
}

async fn post_credentials(path: &str, email: &str, password: &str) -> AppResult<ActionResponse> {
    let request = Request::post(&endpoint(path))
        .json(&json!({ "email": email, "password": password }))
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    read_response(send(request).await?).await
}

async fn send(request: Request) -> AppResult<Response> {
    request
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))
}

async fn read_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.ok() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Server {
            status: response.status(),
            message: error_message(&body),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

fn check_file_size(size: f64) -> AppResult<()> {
    if size > MAX_FILE_SIZE as f64 {
        return Err(AppError::Validation(format!(
            "File too large ({:.1} MB, max {} MB)",
            size / 1_048_576.0,
            MAX_FILE_SIZE / 1_048_576
        )));
    }
    Ok(())
}

/// `{"error": ...}` bodies from the backend, raw text otherwise.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Operation, StatusLevel};

    #[test]
    fn test_action_response_deserialization() {
        let json = r#"{
            "requestId": "123e4567-e89b-12d3-a456-426614174000",
            "status": {
                "level": "success",
                "operation": "import",
                "message": "Contacts imported (2).",
                "at": "2026-03-01T10:15:00+00:00"
            },
            "listing": {
                "rows": [
                    {"id": 1, "name": "Ana", "email": "ana@x.com"},
                    {"id": 2, "name": "Leo", "email": "leo@x.com"}
                ],
                "placeholder": null
            },
            "busy": {"session": false, "import": false, "refresh": false, "delete": false}
        }"#;

        let response: ActionResponse = serde_json::from_str(json).unwrap();
        let status = response.status.unwrap();
        assert_eq!(status.level, StatusLevel::Success);
        assert_eq!(status.operation, Operation::Import);
        assert_eq!(response.listing.rows.len(), 2);
        assert!(response.listing.placeholder.is_none());
    }

    #[test]
    fn test_listing_fetch_without_status() {
        let json = r#"{
            "requestId": "x",
            "status": null,
            "listing": {"rows": [], "placeholder": "No contacts yet."},
            "busy": {"session": false, "import": false, "refresh": false, "delete": false}
        }"#;

        let response: ActionResponse = serde_json::from_str(json).unwrap();
        assert!(response.status.is_none());
        assert_eq!(response.listing.placeholder.as_deref(), Some("No contacts yet."));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"requestId": "x", "error": "Multipart error: bad"}"#),
            "Multipart error: bad"
        );
        assert_eq!(error_message("Payload Too Large\n"), "Payload Too Large");
    }

    #[test]
    fn test_check_file_size() {
        assert!(check_file_size(1024.0).is_ok());
        let err = check_file_size((MAX_FILE_SIZE + 1) as f64).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("/api/contacts"), "http://localhost:3000/api/contacts");
    }
}
