//! In-process auth and data service.
//!
//! Behaves like a freshly created hosted project: an identity column for
//! contacts, one account per email, password sign-in. Used by
//! `contactbook serve --in-memory` and by the tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{AuthSession, Contact, ContactId, Credentials, Record};

use super::{AuthService, ContactStore};

/// Passwords shorter than this are rejected at sign-up, like the hosted default.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Default)]
struct Tables {
    users: HashMap<String, String>,
    contacts: Vec<Contact>,
    last_id: i64,
}

/// In-memory stand-in for the hosted service.
#[derive(Default)]
pub struct MemoryService {
    tables: Mutex<Tables>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing rows; each gets the next identity value.
    pub async fn seed(&self, records: Vec<Record>) {
        let mut tables = self.tables.lock().await;
        for record in records {
            tables.last_id += 1;
            let id = tables.last_id;
            tables.contacts.push(Contact::new(id, record));
        }
    }

    pub async fn len(&self) -> usize {
        self.tables.lock().await.contacts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AuthService for MemoryService {
    async fn sign_up(&self, credentials: &Credentials) -> ServiceResult<()> {
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::api(
                422,
                format!("Password should be at least {} characters.", MIN_PASSWORD_LEN),
            ));
        }

        let mut tables = self.tables.lock().await;
        let email = credentials.email.trim().to_lowercase();
        if tables.users.contains_key(&email) {
            return Err(ServiceError::api(422, "User already registered"));
        }
        tables.users.insert(email, credentials.password.clone());
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> ServiceResult<AuthSession> {
        let tables = self.tables.lock().await;
        let email = credentials.email.trim().to_lowercase();

        match tables.users.get(&email) {
            Some(password) if *password == credentials.password => Ok(AuthSession {
                access_token: Uuid::new_v4().to_string(),
                refresh_token: None,
                expires_in: Some(3600),
                email: Some(email),
            }),
            _ => Err(ServiceError::api(400, "Invalid login credentials")),
        }
    }
}

#[async_trait]
impl ContactStore for MemoryService {
    async fn select_all(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.tables.lock().await.contacts.clone())
    }

    async fn insert_many(&self, records: &[Record]) -> ServiceResult<()> {
        if let Some(record) = records.iter().find(|r| r.contains_key("id")) {
            return Err(ServiceError::api(
                428,
                format!(
                    "cannot insert a non-DEFAULT value into column \"id\" (got {})",
                    record["id"]
                ),
            ));
        }

        let mut tables = self.tables.lock().await;
        for record in records {
            tables.last_id += 1;
            let id = tables.last_id;
            tables.contacts.push(Contact::new(id, record.clone()));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &ContactId) -> ServiceResult<()> {
        self.tables.lock().await.contacts.retain(|c| &c.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let service = MemoryService::new();
        let creds = Credentials::new("Ana@X.com", "secret1");

        service.sign_up(&creds).await.unwrap();
        let session = service.sign_in(&creds).await.unwrap();

        assert_eq!(session.email.as_deref(), Some("ana@x.com"));
        assert!(!session.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_and_short_password() {
        let service = MemoryService::new();
        service
            .sign_up(&Credentials::new("ana@x.com", "secret1"))
            .await
            .unwrap();

        let dup = service
            .sign_up(&Credentials::new("ana@x.com", "other12"))
            .await
            .unwrap_err();
        assert_eq!(dup.to_string(), "User already registered");

        let short = service
            .sign_up(&Credentials::new("leo@x.com", "123"))
            .await
            .unwrap_err();
        assert!(short.to_string().contains("at least 6"));

        let wrong = service
            .sign_in(&Credentials::new("ana@x.com", "nope"))
            .await
            .unwrap_err();
        assert_eq!(wrong.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_ids_are_assigned_and_never_reused() {
        let service = MemoryService::new();
        service
            .insert_many(&[record(json!({"nombre": "Ana"})), record(json!({"nombre": "Leo"}))])
            .await
            .unwrap();
        service.delete_by_id(&ContactId::Int(2)).await.unwrap();
        service
            .insert_many(&[record(json!({"nombre": "Eva"}))])
            .await
            .unwrap();

        let ids: Vec<ContactId> = service
            .select_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![ContactId::Int(1), ContactId::Int(3)]);
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_rejected() {
        let service = MemoryService::new();
        let err = service
            .insert_many(&[record(json!({"id": 9, "nombre": "Ana"}))])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("\"id\""));
        assert!(service.is_empty().await);
    }
}
