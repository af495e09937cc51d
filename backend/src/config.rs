//! Service configuration.
//!
//! The hosted service URL and key are read from the environment (a `.env`
//! file is honoured) and can be overridden from the command line.

use std::env;

use crate::error::ConfigError;

/// Default table holding the contacts.
pub const DEFAULT_CONTACTS_TABLE: &str = "contacts";

/// Default HTTP port for `contactbook serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Connection settings for the hosted auth/data service.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Project URL, without trailing slash
    pub url: String,
    /// Anonymous (public) API key
    pub key: String,
    pub contacts_table: String,
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&url).is_err() {
            return Err(ConfigError::InvalidUrl(url));
        }

        Ok(Self {
            url,
            key: key.into(),
            contacts_table: DEFAULT_CONTACTS_TABLE.to_string(),
        })
    }

    /// Read `SUPABASE_URL` / `SUPABASE_KEY` (or their `NEXT_PUBLIC_` variants)
    /// and the optional `CONTACTS_TABLE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None, None)
    }

    /// Like [`ServiceConfig::from_env`], with explicit values taking precedence.
    pub fn from_env_with(url: Option<String>, key: Option<String>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let url = url
            .or_else(|| first_var(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]))
            .ok_or(ConfigError::MissingUrl)?;
        let key = key
            .or_else(|| first_var(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_KEY"]))
            .ok_or(ConfigError::MissingKey)?;

        let config = Self::new(url, key)?;
        Ok(match first_var(&["CONTACTS_TABLE"]) {
            Some(table) => config.with_contacts_table(table),
            None => config,
        })
    }

    pub fn with_contacts_table(mut self, table: impl Into<String>) -> Self {
        self.contacts_table = table.into();
        self
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    pub(crate) fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.contacts_table)
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("key", &"***")
            .field("contacts_table", &self.contacts_table)
            .finish()
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
