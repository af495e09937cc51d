//! UI Components for the Contactbook page.
//!
//! # Layout Components
//! - [`Header`] - Title bar with the signed-in account
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`SessionForm`] - Email/password sign-up and sign-in
//! - [`ImportSection`] - Spreadsheet selection and import
//! - [`StatusLine`] - Outcome of the last operation
//! - [`ContactList`] - Contacts with delete buttons, placeholder when empty
//! - [`LogsPanel`] - Activity log fed by the SSE status stream

mod contacts;
mod footer;
mod header;
mod hero;
mod import;
mod logs;
mod session;
mod status;

pub use contacts::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use import::*;
pub use logs::*;
pub use session::*;
pub use status::*;
