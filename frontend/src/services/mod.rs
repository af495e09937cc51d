//! Backend services.
//!
//! # Services
//!
//! - [`api`] - Session, import and listing calls to the contactbook backend
//! - [`status`] - SSE subscription to the backend status stream

pub mod api;
pub mod status;

pub use status::*;
