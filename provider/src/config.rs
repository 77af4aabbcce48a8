//! Provider connection settings.
//!
//! # Design
//! Settings arrive from the host as serde data or from the environment.
//! `validate` runs before any request is sent, so a malformed URL or an
//! empty token is a configuration error rather than a connectivity one.

use serde::Deserialize;
use ureq::http::Uri;

use crate::error::{Error, Result};

pub const URL_ENV: &str = "GOTIFY_URL";
pub const TOKEN_ENV: &str = "GOTIFY_TOKEN";

/// Connection settings supplied by the host: the Gotify base URL and a
/// client token.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    /// Read `GOTIFY_URL` and `GOTIFY_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(URL_ENV).ok_or_else(|| Error::Config(format!("{URL_ENV} is not set")))?;
        let token = lookup(TOKEN_ENV).ok_or_else(|| Error::Config(format!("{TOKEN_ENV} is not set")))?;
        Ok(Self::new(url, token))
    }

    /// Both attributes are required and must be non-empty. The URL must be
    /// absolute `http` or `https` with a host.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::Config("url is required".to_string()));
        }
        let uri: Uri = self
            .url
            .parse()
            .map_err(|e| Error::Config(format!("url {:?} is not a valid URL: {e}", self.url)))?;
        if !matches!(uri.scheme_str(), Some("http" | "https")) {
            return Err(Error::Config(format!(
                "url {:?} must start with http:// or https://",
                self.url
            )));
        }
        if uri.host().map_or(true, str::is_empty) {
            return Err(Error::Config(format!("url {:?} has no host", self.url)));
        }
        if self.token.is_empty() {
            return Err(Error::Config("token is required".to_string()));
        }
        Ok(())
    }
}
