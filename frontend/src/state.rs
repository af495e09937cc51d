//! Page state shared by all components.
//!
//! Signals for the status line, the listing, busy flags and the activity
//! log, plus the actions that talk to the backend. Listing updates go
//! through a [`RequestSequence`] so a slow response never overwrites a
//! newer one.

use leptos::*;
use web_sys::File;

use crate::services::api;
use crate::{
    ActionResponse, AppError, BusyState, ContactId, ListingView, LogEntry, Operation,
    RequestSequence, StatusEvent, StatusLevel, MAX_LOG_ENTRIES,
};

/// Shown when import is triggered with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Select a file to import.";

#[derive(Clone)]
pub struct PageState {
    pub status: RwSignal<Option<StatusEvent>>,
    pub listing: RwSignal<ListingView>,
    pub busy: RwSignal<BusyState>,
    pub logs: RwSignal<Vec<LogEntry>>,
    pub signed_in_as: RwSignal<Option<String>>,
    listings: RequestSequence,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            status: create_rw_signal(None),
            listing: create_rw_signal(ListingView::default()),
            busy: create_rw_signal(BusyState::default()),
            logs: create_rw_signal(Vec::new()),
            signed_in_as: create_rw_signal(None),
            listings: RequestSequence::default(),
        }
    }

    pub fn push_log(&self, entry: LogEntry) {
        self.logs.update(|logs| {
            logs.push(entry);
            if logs.len() > MAX_LOG_ENTRIES {
                logs.remove(0);
            }
        });
    }

    pub fn is_busy(&self, operation: Operation) -> bool {
        let busy = self.busy.get();
        match operation {
            Operation::SignUp | Operation::SignIn => busy.session,
            Operation::Import => busy.import,
            Operation::Refresh => busy.refresh,
            Operation::Delete => busy.delete,
        }
    }

    fn set_busy(&self, operation: Operation, value: bool) {
        self.busy.update(|busy| match operation {
            Operation::SignUp | Operation::SignIn => busy.session = value,
            Operation::Import => busy.import = value,
            Operation::Refresh => busy.refresh = value,
            Operation::Delete => busy.delete = value,
        });
    }

    /// Apply a backend response. The status always lands; the listing only
    /// if `ticket` is still the newest listing request.
    fn apply(&self, ticket: Option<u64>, response: ActionResponse) {
        if let Some(status) = response.status {
            self.status.set(Some(status));
        }
        match ticket {
            Some(ticket) if self.listings.is_latest(ticket) => {
                self.listing.set(response.listing);
            }
            Some(ticket) => log::debug!("Dropping superseded listing #{}", ticket),
            None => {}
        }
    }

    /// Frontend-side failure. Refresh failures only reach the log.
    fn fail(&self, operation: Operation, err: AppError) {
        log::error!("❌ {:?} failed: {}", operation, err);
        self.push_log(LogEntry::now(StatusLevel::Error, err.to_string()));
        if operation != Operation::Refresh {
            self.status
                .set(Some(StatusEvent::local(StatusLevel::Error, operation, err.to_string())));
        }
    }

    pub fn sign_up(&self, email: String, password: String) {
        let state = self.clone();
        state.set_busy(Operation::SignUp, true);
        spawn_local(async move {
            match api::sign_up(&email, &password).await {
                Ok(response) => state.apply(None, response),
                Err(e) => state.fail(Operation::SignUp, e),
            }
            state.set_busy(Operation::SignUp, false);
        });
    }

    pub fn sign_in(&self, email: String, password: String) {
        let state = self.clone();
        state.set_busy(Operation::SignIn, true);
        spawn_local(async move {
            match api::sign_in(&email, &password).await {
                Ok(response) => {
                    let signed_in = response
                        .status
                        .as_ref()
                        .is_some_and(|s| s.level == StatusLevel::Success);
                    if signed_in {
                        state.signed_in_as.set(Some(email));
                    }
                    state.apply(None, response);
                }
                Err(e) => state.fail(Operation::SignIn, e),
            }
            state.set_busy(Operation::SignIn, false);
        });
    }

    pub fn import(&self, file: Option<File>) {
        let Some(file) = file else {
            self.status.set(Some(StatusEvent::local(
                StatusLevel::Warning,
                Operation::Import,
                NO_FILE_MESSAGE,
            )));
            return;
        };

        log::info!("📤 Importing {}", file.name());
        let state = self.clone();
        let ticket = state.listings.next();
        state.set_busy(Operation::Import, true);
        spawn_local(async move {
            match api::import_file(file).await {
                Ok(response) => state.apply(Some(ticket), response),
                Err(e) => state.fail(Operation::Import, e),
            }
            state.set_busy(Operation::Import, false);
        });
    }

    pub fn refresh(&self) {
        let state = self.clone();
        let ticket = state.listings.next();
        state.set_busy(Operation::Refresh, true);
        spawn_local(async move {
            match api::fetch_contacts().await {
                Ok(response) => state.apply(Some(ticket), response),
                Err(e) => state.fail(Operation::Refresh, e),
            }
            state.set_busy(Operation::Refresh, false);
        });
    }

    pub fn delete(&self, id: ContactId) {
        let state = self.clone();
        let ticket = state.listings.next();
        state.set_busy(Operation::Delete, true);
        spawn_local(async move {
            match api::delete_contact(&id).await {
                Ok(response) => state.apply(Some(ticket), response),
                Err(e) => state.fail(Operation::Delete, e),
            }
            state.set_busy(Operation::Delete, false);
        });
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
