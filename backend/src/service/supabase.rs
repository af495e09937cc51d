//! HTTP client for a hosted Supabase-style project.
//!
//! Auth calls go to the GoTrue endpoints under `/auth/v1`, table calls to the
//! PostgREST endpoints under `/rest/v1`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contactbook::service::{ContactStore, SupabaseClient};
//!
//! let client = SupabaseClient::from_env()?;
//! let contacts = client.select_all().await?;
//! ```

use async_trait::async_trait;
use reqwest::{header, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, RwLock};

use crate::config::ServiceConfig;
use crate::error::{ConfigError, ServiceError, ServiceResult};
use crate::models::{AuthSession, Contact, ContactId, Credentials, Record};

use super::{AuthService, ContactStore};

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}

/// Client for the hosted auth and data service.
///
/// Cloning is cheap and clones share the signed-in access token.
#[derive(Clone)]
pub struct SupabaseClient {
    config: ServiceConfig,
    http: reqwest::Client,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client from `SUPABASE_URL` / `SUPABASE_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ServiceConfig::from_env()?))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Whether a sign-in token is held.
    pub fn is_signed_in(&self) -> bool {
        self.access_token
            .read()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }

    /// Bearer for data requests: the signed-in user's token, else the API key.
    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.config.key.clone())
    }

    fn auth_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.key)
    }

    fn data_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()))
    }
}

#[async_trait]
impl AuthService for SupabaseClient {
    async fn sign_up(&self, credentials: &Credentials) -> ServiceResult<()> {
        let response = self
            .auth_request(self.http.post(self.config.auth_url("signup")))
            .json(&json!({ "email": credentials.email, "password": credentials.password }))
            .send()
            .await?;

        read_body(response).await?;
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> ServiceResult<AuthSession> {
        let response = self
            .auth_request(self.http.post(self.config.auth_url("token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": credentials.email, "password": credentials.password }))
            .send()
            .await?;

        let body = read_body(response).await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;

        if let Ok(mut slot) = self.access_token.write() {
            *slot = Some(token.access_token.clone());
        }

        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            email: token.user.and_then(|u| u.email),
        })
    }
}

#[async_trait]
impl ContactStore for SupabaseClient {
    async fn select_all(&self) -> ServiceResult<Vec<Contact>> {
        let response = self
            .data_request(self.http.get(self.config.table_url()))
            .query(&[("select", "*")])
            .send()
            .await?;

        let body = read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn insert_many(&self, records: &[Record]) -> ServiceResult<()> {
        let response = self
            .data_request(self.http.post(self.config.table_url()))
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await?;

        read_body(response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &ContactId) -> ServiceResult<()> {
        let response = self
            .data_request(self.http.delete(self.config.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        read_body(response).await?;
        Ok(())
    }
}

/// Read the body, turning non-2xx answers into [`ServiceError::Api`].
async fn read_body(response: Response) -> ServiceResult<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(&body).unwrap_or_else(|| format!("HTTP {}", status));
        return Err(ServiceError::api(status.as_u16(), message));
    }

    Ok(body)
}

/// Pull the human-readable message out of an error body.
///
/// Auth errors use `msg` or `error_description`, table errors use `message`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
