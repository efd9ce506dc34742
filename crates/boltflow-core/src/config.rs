//! Backend Configuration
//!
//! Where the hosted backend lives and which public key to present.

use std::env;

use log::{info, warn};
use reqwest::Url;

use crate::error::{DomainError, DomainResult};

pub const URL_VAR: &str = "BOLTFLOW_SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "BOLTFLOW_SUPABASE_ANON_KEY";

pub const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";
pub const PLACEHOLDER_KEY: &str = "placeholder-key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Read the process environment (native builds)
    pub fn from_env() -> Self {
        Self::from_values(env::var(URL_VAR).ok(), env::var(ANON_KEY_VAR).ok())
    }

    /// Read values baked in at compile time (browser builds)
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("BOLTFLOW_SUPABASE_URL").map(String::from),
            option_env!("BOLTFLOW_SUPABASE_ANON_KEY").map(String::from),
        )
    }

    fn from_values(url: Option<String>, anon_key: Option<String>) -> Self {
        Self {
            url: or_placeholder(URL_VAR, url, PLACEHOLDER_URL),
            anon_key: or_placeholder(ANON_KEY_VAR, anon_key, PLACEHOLDER_KEY),
        }
    }

    /// False while either value is missing or still a placeholder
    pub fn is_configured(&self) -> bool {
        let url = self.url.trim();
        let key = self.anon_key.trim();
        !url.is_empty() && url != PLACEHOLDER_URL && !key.is_empty() && key != PLACEHOLDER_KEY
    }

    /// Parsed base URL, guaranteed to end with a slash so joins keep the path
    pub fn base_url(&self) -> DomainResult<Url> {
        let mut raw = self.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| DomainError::Config(format!("{}: {}", URL_VAR, e)))?;
        if url.cannot_be_a_base() {
            return Err(DomainError::Config(format!("{} is not a base URL", URL_VAR)));
        }
        Ok(url)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.is_configured() {
            return Err(DomainError::Config(format!("set {} and {}", URL_VAR, ANON_KEY_VAR)));
        }
        self.base_url().map(|_| ())
    }
}

fn or_placeholder(key: &str, value: Option<String>, default: &str) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => {
            info!("{key} loaded");
            v
        }
        None => {
            warn!("{key} not set, using placeholder {default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_not_configured() {
        let config = BackendConfig::from_values(None, None);
        assert_eq!(config.url, PLACEHOLDER_URL);
        assert_eq!(config.anon_key, PLACEHOLDER_KEY);
        assert!(!config.is_configured());
        assert!(matches!(config.validate(), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_configured() {
        let config = BackendConfig::new("https://abc.supabase.co", "anon");
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url().unwrap().as_str(), "https://abc.supabase.co/");
    }

    #[test]
    fn test_base_url_keeps_path() {
        let config = BackendConfig::new("http://127.0.0.1:54321/proxy", "anon");
        let url = config.base_url().unwrap();
        assert_eq!(url.join("rest/v1/tasks").unwrap().path(), "/proxy/rest/v1/tasks");
    }

    #[test]
    fn test_invalid_url() {
        let config = BackendConfig::new("not a url", "anon");
        assert!(matches!(config.validate(), Err(DomainError::Config(_))));
    }
}
