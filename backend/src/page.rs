//! The contact page: session, import and listing wired to one reporter.
//!
//! ```rust,ignore
//! use contactbook::{ContactPage, SupabaseClient};
//! use std::sync::Arc;
//!
//! let page = ContactPage::new(Arc::new(SupabaseClient::from_env()?));
//! page.load().await;
//! println!("{}", page.listing().await);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::components::{
    ImportComponent, ListingComponent, ListingView, RefreshOutcome, SelectedFile,
    SessionComponent,
};
use crate::models::ContactId;
use crate::service::{AuthService, ContactStore};
use crate::status::{StatusEvent, StatusReporter};

/// Which operations currently have a request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyState {
    pub session: bool,
    pub import: bool,
    pub refresh: bool,
    pub delete: bool,
}

/// Everything the UI needs to draw the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub status: Option<StatusEvent>,
    pub listing: ListingView,
    pub busy: BusyState,
}

pub struct ContactPage {
    session: SessionComponent,
    import: ImportComponent,
    listing: Arc<ListingComponent>,
    reporter: Arc<StatusReporter>,
}

impl ContactPage {
    /// One service acting as both auth and data backend.
    pub fn new<S>(service: Arc<S>) -> Self
    where
        S: AuthService + ContactStore + 'static,
    {
        Self::with_reporter(service, Arc::new(StatusReporter::new()))
    }

    /// Like [`ContactPage::new`], reporting through `reporter`.
    pub fn with_reporter<S>(service: Arc<S>, reporter: Arc<StatusReporter>) -> Self
    where
        S: AuthService + ContactStore + 'static,
    {
        Self::with_services(service.clone(), service, reporter)
    }

    pub fn with_services(
        auth: Arc<dyn AuthService>,
        store: Arc<dyn ContactStore>,
        reporter: Arc<StatusReporter>,
    ) -> Self {
        let listing = Arc::new(ListingComponent::new(store.clone(), reporter.clone()));
        Self {
            session: SessionComponent::new(auth, reporter.clone()),
            import: ImportComponent::new(store, reporter.clone(), listing.clone()),
            listing,
            reporter,
        }
    }

    /// Initial fetch, run once when the page comes up.
    pub async fn load(&self) -> RefreshOutcome {
        self.listing.refresh().await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> StatusEvent {
        self.session.sign_up(email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> StatusEvent {
        self.session.sign_in(email, password).await
    }

    pub async fn import_file(&self, file: Option<SelectedFile>) -> StatusEvent {
        self.import.import_file(file).await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.listing.refresh().await
    }

    pub async fn delete_contact(&self, id: &ContactId) -> StatusEvent {
        self.listing.delete_contact(id).await
    }

    pub async fn listing(&self) -> ListingView {
        self.listing.view().await
    }

    /// Current status line.
    pub fn status(&self) -> Option<StatusEvent> {
        self.reporter.current()
    }

    pub fn reporter(&self) -> &Arc<StatusReporter> {
        &self.reporter
    }

    pub fn busy(&self) -> BusyState {
        BusyState {
            session: self.session.is_busy(),
            import: self.import.is_busy(),
            refresh: self.listing.is_refreshing(),
            delete: self.listing.is_deleting(),
        }
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            status: self.status(),
            listing: self.listing().await,
            busy: self.busy(),
        }
    }
}
