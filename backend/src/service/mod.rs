//! Seams to the hosted auth and data services.
//!
//! - [`AuthService`] - registration and password sign-in
//! - [`ContactStore`] - select / bulk insert / delete on the contacts table
//! - [`SupabaseClient`] - both, over HTTP against a hosted project
//! - [`MemoryService`] - both, in process

pub mod memory;
pub mod supabase;

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{AuthSession, Contact, ContactId, Credentials, Record};

pub use memory::MemoryService;
pub use supabase::SupabaseClient;

/// Hosted identity provider.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account. The service may require email confirmation.
    async fn sign_up(&self, credentials: &Credentials) -> ServiceResult<()>;

    /// Password sign-in.
    async fn sign_in(&self, credentials: &Credentials) -> ServiceResult<AuthSession>;
}

/// Collection-style access to the contacts table.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn select_all(&self) -> ServiceResult<Vec<Contact>>;

    /// Insert every record in one request. Identifiers are assigned by the store.
    async fn insert_many(&self, records: &[Record]) -> ServiceResult<()>;

    async fn delete_by_id(&self, id: &ContactId) -> ServiceResult<()>;
}
