//! Contactbook - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for signing in, importing a spreadsheet of contacts
//! and managing the contact list through the contactbook backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (signed-in account)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── SessionForm                                            │
//! │  ├── ImportSection                                          │
//! │  ├── StatusLine                                             │
//! │  ├── ContactList                                            │
//! │  └── LogsPanel (SSE status stream)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (StatusEvent, ListingView, LogEntry, etc.)
//! - [`state`] - Page signals and backend actions
//! - [`components`] - UI components
//! - [`services`] - Backend communication (HTTP API, SSE)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Status
    Operation, StatusEvent, StatusLevel,
    // Listing
    ContactId, ContactRow, ListingView,
    // API
    ActionResponse, BusyState,
    // Logs
    LogEntry,
    // Requests
    RequestSequence,
    // Errors
    AppError, AppResult,
};

// State
pub use state::PageState;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Contactbook - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let state = PageState::new();

    // SSE feeds the activity log; the status line comes from responses
    let logs_state = state.clone();
    init_status_stream(move |event| logs_state.push_log(LogEntry::from(&event)));

    // Initial listing, once per page load
    state.refresh();

    view! {
        <Header signed_in_as=state.signed_in_as/>

        <div class="container">
            <Hero/>
            <SessionForm state=state.clone()/>
            <ImportSection state=state.clone()/>
            <StatusLine status=state.status/>
            <ContactList state=state.clone()/>
            <LogsPanel logs=state.logs/>
        </div>

        <Footer/>
    }
}
