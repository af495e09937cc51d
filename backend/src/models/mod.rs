//! Domain models for the contact book.
//!
//! - [`Contact`] - A stored contact, as returned by the data service
//! - [`ContactId`] - Service-assigned identifier (integer or text)
//! - [`Record`] - One spreadsheet row, header -> cell value
//! - [`Credentials`] - Email/password pair sent to the auth service
//! - [`AuthSession`] - Tokens returned by a successful sign-in

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One imported row: column header -> cell value.
pub type Record = Map<String, Value>;

// =============================================================================
// Contact Identifier
// =============================================================================

/// Identifier assigned by the data service.
///
/// Tables created with an identity column hand back integers, tables keyed by
/// `uuid` hand back strings. The client never generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Int(id) => write!(f, "{}", id),
            ContactId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ContactId {
    fn from(id: i64) -> Self {
        ContactId::Int(id)
    }
}

impl From<&str> for ContactId {
    /// Parses integers so that ids typed on a command line or taken from a URL
    /// compare equal to the ones the service returned.
    fn from(id: &str) -> Self {
        match id.trim().parse::<i64>() {
            Ok(n) => ContactId::Int(n),
            Err(_) => ContactId::Text(id.to_string()),
        }
    }
}

// =============================================================================
// Contact
// =============================================================================

/// A stored contact.
///
/// Only `id` is structural. Everything else (`nombre`, `email` and whatever
/// columns the spreadsheet carried) lives in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(flatten)]
    pub attributes: Record,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>, attributes: Record) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Display name: the `nombre` column, else `name`.
    pub fn name(&self) -> Option<String> {
        self.text_attribute("nombre")
            .or_else(|| self.text_attribute("name"))
    }

    pub fn email(&self) -> Option<String> {
        self.text_attribute("email")
    }

    fn text_attribute(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Email/password pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_deserializes_with_extra_columns() {
        let contact: Contact = serde_json::from_value(json!({
            "id": 7,
            "nombre": "Ana",
            "email": "ana@x.com",
            "empresa": "ACME"
        }))
        .unwrap();

        assert_eq!(contact.id, ContactId::Int(7));
        assert_eq!(contact.name().as_deref(), Some("Ana"));
        assert_eq!(contact.email().as_deref(), Some("ana@x.com"));
        assert_eq!(contact.attributes["empresa"], "ACME");
        assert!(!contact.attributes.contains_key("id"));
    }

    #[test]
    fn test_uuid_ids_and_name_fallback() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "5b1f0c7e-4a9e-4a8e-9d7e-1f2a3b4c5d6e",
            "name": "Leo"
        }))
        .unwrap();

        assert_eq!(contact.id.to_string(), "5b1f0c7e-4a9e-4a8e-9d7e-1f2a3b4c5d6e");
        assert_eq!(contact.name().as_deref(), Some("Leo"));
        assert_eq!(contact.email(), None);
    }

    #[test]
    fn test_contact_id_from_str() {
        assert_eq!(ContactId::from("42"), ContactId::Int(42));
        assert_eq!(ContactId::from("abc"), ContactId::Text("abc".into()));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("ana@x.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ana@x.com"));
        assert!(!debug.contains("hunter2"));
    }
}
