//! Contact listing: fetch, render, delete.
//!
//! Every refresh takes a sequence number when it is issued. A completed
//! refresh only replaces the listing if no newer refresh has been issued
//! since, so a slow stale response cannot overwrite a fresher one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ServiceError;
use crate::models::{Contact, ContactId};
use crate::service::ContactStore;
use crate::status::{Operation, StatusEvent, StatusReporter};

use super::BusyFlag;

pub const EMPTY_PLACEHOLDER: &str = "No contacts yet.";
pub const DELETED_MESSAGE: &str = "Contact deleted.";

/// What a finished refresh did.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The listing now holds this many contacts.
    Applied(usize),
    /// A newer refresh was issued meanwhile; the result was dropped.
    Superseded,
    /// The fetch failed; the previous listing is kept.
    Failed(ServiceError),
}

/// One displayed row: name and email only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRow {
    pub id: ContactId,
    pub name: String,
    pub email: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name().unwrap_or_default(),
            email: contact.email().unwrap_or_default(),
        }
    }
}

/// Rendered listing. `placeholder` is set exactly when `rows` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingView {
    pub rows: Vec<ContactRow>,
    pub placeholder: Option<String>,
}

impl ListingView {
    pub fn render(contacts: &[Contact]) -> Self {
        let rows: Vec<ContactRow> = contacts.iter().map(ContactRow::from).collect();
        let placeholder = rows.is_empty().then(|| EMPTY_PLACEHOLDER.to_string());
        Self { rows, placeholder }
    }
}

impl fmt::Display for ListingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(placeholder) = &self.placeholder {
            return writeln!(f, "{}", placeholder);
        }
        for row in &self.rows {
            writeln!(f, "[{}] {} - {}", row.id, row.name, row.email)?;
        }
        Ok(())
    }
}

/// Holds the last applied listing.
pub struct ListingComponent {
    store: Arc<dyn ContactStore>,
    reporter: Arc<StatusReporter>,
    contacts: RwLock<Vec<Contact>>,
    issued: AtomicU64,
    refreshing: BusyFlag,
    deleting: BusyFlag,
}

impl ListingComponent {
    pub fn new(store: Arc<dyn ContactStore>, reporter: Arc<StatusReporter>) -> Self {
        Self {
            store,
            reporter,
            contacts: RwLock::new(Vec::new()),
            issued: AtomicU64::new(0),
            refreshing: BusyFlag::default(),
            deleting: BusyFlag::default(),
        }
    }

    /// Fetch every contact and replace the listing.
    ///
    /// Failures are reported as refresh events only; the status line and the
    /// current listing are left alone.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _busy = self.refreshing.enter();
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        match self.store.select_all().await {
            Ok(fetched) => {
                let mut contacts = self.contacts.write().await;
                if seq != self.issued.load(Ordering::SeqCst) {
                    return RefreshOutcome::Superseded;
                }
                let count = fetched.len();
                *contacts = fetched;
                RefreshOutcome::Applied(count)
            }
            Err(err) => {
                self.reporter.report(StatusEvent::error(
                    Operation::Refresh,
                    format!("Could not load contacts: {}", err),
                ));
                RefreshOutcome::Failed(err)
            }
        }
    }

    /// Delete one contact, then refresh on success.
    pub async fn delete_contact(&self, id: &ContactId) -> StatusEvent {
        let result = {
            let _busy = self.deleting.enter();
            self.store.delete_by_id(id).await
        };

        let event = match &result {
            Ok(()) => StatusEvent::success(Operation::Delete, DELETED_MESSAGE),
            Err(err) => StatusEvent::error(
                Operation::Delete,
                format!("Could not delete contact {}: {}", id, err),
            ),
        };
        self.reporter.report(event.clone());

        if result.is_ok() {
            self.refresh().await;
        }
        event
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.contacts.read().await.clone()
    }

    pub async fn view(&self) -> ListingView {
        ListingView::render(&self.contacts.read().await)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_busy()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.is_busy()
    }
}
