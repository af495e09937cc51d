//! # Contactbook - contacts on top of a hosted auth/data service
//!
//! Sign-up / sign-in, spreadsheet import and a contact listing with delete,
//! all delegated to a hosted Supabase-style project.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  xlsx / csv  │────▶│    Parser    │────▶│   Records    │──┐
//! │   (upload)   │     │ (first sheet)│     │ header→value │  │ insert_many
//! └──────────────┘     └──────────────┘     └──────────────┘  ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────────────┐
//! │   Session    │────▶│ AuthService  │     │       ContactStore       │
//! └──────────────┘     └──────────────┘     └──────────────────────────┘
//!                                                     │ select_all / delete_by_id
//!                                           ┌──────────────┐
//!                                           │   Listing    │
//!                                           └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use contactbook::{ContactPage, SelectedFile, SupabaseClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = ContactPage::new(Arc::new(SupabaseClient::from_env()?));
//!     page.load().await;
//!
//!     let file = SelectedFile::from_path("contactos.xlsx".as_ref()).await?;
//!     println!("{}", page.import_file(Some(file)).await.message);
//!     print!("{}", page.listing().await);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Contact, identifiers, credentials
//! - [`config`] - Service URL / key configuration
//! - [`parser`] - Spreadsheet to record conversion
//! - [`service`] - Auth and data service seams, hosted and in-memory
//! - [`status`] - Status events and reporter
//! - [`components`] - Session, import and listing
//! - [`page`] - The page wiring them together
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// External services
pub mod service;

// Page
pub mod components;
pub mod page;
pub mod status;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ServiceConfig;

pub use error::{
    ConfigError, ImportError, ServerError, ServiceError, SpreadsheetError,
};

pub use models::{AuthSession, Contact, ContactId, Credentials, Record};

pub use parser::{parse_bytes, parse_file, ParseResult, SourceFormat};

pub use service::{AuthService, ContactStore, MemoryService, SupabaseClient};

pub use status::{Operation, StatusEvent, StatusLevel, StatusReporter};

pub use components::{
    ContactRow, ImportComponent, ListingComponent, ListingView, RefreshOutcome, SelectedFile,
    SessionComponent,
};

pub use page::{BusyState, ContactPage, PageSnapshot};

pub use api::types::{ActionResponse, CredentialsRequest};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
