//! Client configuration and the handle shared by every resource module.
//!
//! # Design
//! The facade owns one `SharedConfig` and hands clones of the `Arc` to each
//! resource module. Requests take a snapshot at construction time, so a
//! reconfiguration racing with an in-flight call may or may not be observed
//! by that call. Later calls always see it.

use std::sync::{Arc, RwLock};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.docmason.com/api/v1";

pub const API_KEY_ENV: &str = "DOCMASON_API_KEY";
pub const BASE_URL_ENV: &str = "DOCMASON_BASE_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Read `DOCMASON_API_KEY` (required) and `DOCMASON_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_ENV).ok_or(ConfigError::MissingEnv(API_KEY_ENV))?;
        let config = Self::new(api_key);
        Ok(match lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Shallow merge: fields present in `update` replace the current ones.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(api_key) = update.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = normalize_base_url(base_url);
        }
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            base_url: self.base_url.clone(),
            has_api_key: self.has_api_key(),
        }
    }
}

// Hand-written so the key never lands in logs or panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Partial configuration applied by `DocMason::update_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ConfigUpdate {
    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
        }
    }

    pub fn base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: Some(base_url.into()),
        }
    }
}

/// Redacted view of the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub base_url: String,
    pub has_api_key: bool,
}

/// Configuration shared between the facade and every resource module.
#[derive(Debug, Clone)]
pub struct SharedConfig(Arc<RwLock<Config>>);

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    pub fn snapshot(&self) -> Config {
        // The guarded value is two strings; a panic mid-write cannot leave
        // it in an unusable state, so poisoning is ignored.
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn update(&self, update: ConfigUpdate) {
        self.0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .apply(update);
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_production_url() {
        let config = Config::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.has_api_key());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::new("key").with_base_url("http://localhost:3001/api/v1/");
        assert_eq!(config.base_url, "http://localhost:3001/api/v1");
    }

    #[test]
    fn apply_is_shallow_merge() {
        let mut config = Config::new("old").with_base_url("http://a");
        config.apply(ConfigUpdate::api_key("new"));
        assert_eq!(config.api_key, "new");
        assert_eq!(config.base_url, "http://a");

        config.apply(ConfigUpdate::base_url("http://b/"));
        assert_eq!(config.api_key, "new");
        assert_eq!(config.base_url, "http://b");

        config.apply(ConfigUpdate::default());
        assert_eq!(config, Config::new("new").with_base_url("http://b"));
    }

    #[test]
    fn summary_redacts_key() {
        let summary = Config::new("secret").summary();
        assert!(summary.has_api_key);
        assert_eq!(summary.base_url, DEFAULT_BASE_URL);
        assert!(!Config::new("  ").summary().has_api_key);
    }

    #[test]
    fn debug_never_prints_key() {
        let rendered = format!("{:?}", Config::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn shared_update_is_visible_to_clones() {
        let shared = SharedConfig::new(Config::new("first"));
        let other = shared.clone();
        shared.update(ConfigUpdate::api_key("second"));
        assert_eq!(other.snapshot().api_key, "second");
    }

    #[test]
    fn from_lookup_requires_key() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(API_KEY_ENV)));
    }

    #[test]
    fn from_lookup_reads_optional_base_url() {
        let config = Config::from_lookup(|name| match name {
            API_KEY_ENV => Some("env-key".to_string()),
            BASE_URL_ENV => Some("http://localhost:3001/api/v1/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://localhost:3001/api/v1");

        let config = Config::from_lookup(|name| (name == API_KEY_ENV).then(|| "k".to_string())).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
