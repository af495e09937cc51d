//! HTTP server exposing the contact page.
//!
//! # API Endpoints
//!
//! | Method | Path                 | Description                          |
//! |--------|----------------------|--------------------------------------|
//! | GET    | `/health`            | Health check                         |
//! | POST   | `/api/auth/signup`   | Register email/password              |
//! | POST   | `/api/auth/signin`   | Password sign-in                     |
//! | POST   | `/api/import`        | Import a spreadsheet (multipart)     |
//! | GET    | `/api/contacts`      | Refresh and return the listing       |
//! | DELETE | `/api/contacts/{id}` | Delete one contact                   |
//! | GET    | `/api/status`        | SSE stream of status events          |

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{delete, get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::types::{error_response, ActionResponse, CredentialsRequest};
use crate::components::SelectedFile;
use crate::error::ServerError;
use crate::models::ContactId;
use crate::page::ContactPage;
use crate::status::StatusEvent;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

type SharedPage = Arc<ContactPage>;
type ApiError = (StatusCode, Json<Value>);

/// Build the router. Paths not matched by the API are served from
/// `static_dir` when given (the built frontend).
pub fn router(page: SharedPage, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/import", post(import_file))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/{id}", delete(delete_contact))
        .route("/api/status", get(sse_status))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(page);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(health)),
    }
}

/// Start the HTTP server
pub async fn start_server(
    page: SharedPage,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<(), ServerError> {
    let serving_static = static_dir.is_some();
    let app = router(page, static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Contactbook server running on http://localhost:{}", port);
    println!("   POST   /api/auth/signup   - Sign up");
    println!("   POST   /api/auth/signin   - Sign in");
    println!("   POST   /api/import        - Import spreadsheet");
    println!("   GET    /api/contacts      - List contacts");
    println!("   DELETE /api/contacts/{{id}} - Delete contact");
    println!("   GET    /api/status        - SSE status stream");
    if serving_static {
        println!("   GET    /                  - Frontend");
    }
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "contactbook",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn respond(page: &ContactPage, status: Option<StatusEvent>) -> Json<ActionResponse> {
    Json(ActionResponse::new(status, page.snapshot().await))
}

async fn sign_up(
    State(page): State<SharedPage>,
    Json(body): Json<CredentialsRequest>,
) -> Json<ActionResponse> {
    let event = page.sign_up(&body.email, &body.password).await;
    respond(&page, Some(event)).await
}

async fn sign_in(
    State(page): State<SharedPage>,
    Json(body): Json<CredentialsRequest>,
) -> Json<ActionResponse> {
    let event = page.sign_in(&body.email, &body.password).await;
    respond(&page, Some(event)).await
}

/// Import endpoint. A request without a `file` part is the "nothing selected"
/// case, not a protocol error. So is a nameless empty part, which is what a
/// browser form sends for an untouched file input. A named file is imported
/// even when it is empty.
async fn import_file(
    State(page): State<SharedPage>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, ApiError> {
    let mut selected: Option<SelectedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(error_response(&format!("Multipart error: {}", e))))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            (StatusCode::BAD_REQUEST, Json(error_response(&format!("Read error: {}", e))))
        })?;

        if name.is_none() && bytes.is_empty() {
            continue;
        }
        let name = name.unwrap_or_else(|| "upload".to_string());
        println!("📄 Upload: {} ({} bytes)", name, bytes.len());
        selected = Some(SelectedFile::new(name, bytes.to_vec()));
    }

    let event = page.import_file(selected).await;
    Ok(respond(&page, Some(event)).await)
}

async fn list_contacts(State(page): State<SharedPage>) -> Json<ActionResponse> {
    page.refresh().await;
    respond(&page, None).await
}

async fn delete_contact(
    State(page): State<SharedPage>,
    Path(id): Path<String>,
) -> Json<ActionResponse> {
    let event = page.delete_contact(&ContactId::from(id.as_str())).await;
    respond(&page, Some(event)).await
}

/// SSE endpoint streaming every status event, refresh failures included.
async fn sse_status(
    State(page): State<SharedPage>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = page.reporter().subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let event = result.ok()?;
        let json = serde_json::to_string(&event).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
