//! Facade over the five resource modules.
//!
//! # Design
//! `DocMason` owns the `SharedConfig` and builds one `Transport` that every
//! resource module clones, so all of them read the same configuration at
//! call time. `update_config` is the only writer. A call already past
//! request construction keeps the configuration it started with; there is
//! no ordering guarantee between a reconfiguration and calls in flight.

use tracing::debug;

use crate::api::{TemplateApi, TemplateDataApi, TemplateRequestApi, UserApi, UserApiKeyApi};
use crate::config::{Config, ConfigSummary, ConfigUpdate, SharedConfig};
use crate::error::ConfigError;
use crate::transport::Transport;

/// Client for the document templating and PDF generation service.
#[derive(Debug, Clone)]
pub struct DocMason {
    config: SharedConfig,
    template: TemplateApi,
    template_data: TemplateDataApi,
    template_request: TemplateRequestApi,
    user_api: UserApiKeyApi,
    user: UserApi,
}

impl DocMason {
    /// Fails with `ConfigError::MissingApiKey` before any network activity
    /// when the key is empty.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        if !config.has_api_key() {
            return Err(ConfigError::MissingApiKey);
        }
        debug!(base_url = %config.base_url, "creating client");

        let config = SharedConfig::new(config);
        let transport = Transport::new(config.clone())?;
        Ok(Self {
            template: TemplateApi::new(transport.clone()),
            template_data: TemplateDataApi::new(transport.clone()),
            template_request: TemplateRequestApi::new(transport.clone()),
            user_api: UserApiKeyApi::new(transport.clone()),
            user: UserApi::new(transport),
            config,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(Config::from_env()?)
    }

    pub fn template(&self) -> &TemplateApi {
        &self.template
    }

    pub fn template_data(&self) -> &TemplateDataApi {
        &self.template_data
    }

    pub fn template_request(&self) -> &TemplateRequestApi {
        &self.template_request
    }

    pub fn user_api(&self) -> &UserApiKeyApi {
        &self.user_api
    }

    pub fn user(&self) -> &UserApi {
        &self.user
    }

    /// Replace the fields present in `update`; every module sees the change
    /// on its next call.
    pub fn update_config(&self, update: ConfigUpdate) {
        debug!(
            api_key_changed = update.api_key.is_some(),
            base_url = ?update.base_url,
            "updating client configuration"
        );
        self.config.update(update);
    }

    pub fn config(&self) -> ConfigSummary {
        self.config.snapshot().summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use crate::transport::build_http_request;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(DocMason::new(Config::new("")), Err(ConfigError::MissingApiKey)));
        assert!(matches!(DocMason::new(Config::new("   ")), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn config_is_redacted() {
        let client = DocMason::new(Config::new("secret")).unwrap();
        let summary = client.config();
        assert!(summary.has_api_key);
        assert_eq!(summary.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn update_config_merges() {
        let client = DocMason::new(Config::new("secret").with_base_url("http://a")).unwrap();
        client.update_config(ConfigUpdate::base_url("http://b"));
        assert_eq!(
            client.config(),
            ConfigSummary {
                base_url: "http://b".to_string(),
                has_api_key: true,
            }
        );
        client.update_config(ConfigUpdate::api_key(""));
        assert!(!client.config().has_api_key);
        assert_eq!(client.config().base_url, "http://b");
    }

    #[test]
    fn update_reaches_every_module() {
        let client = DocMason::new(Config::new("old").with_base_url("http://a")).unwrap();
        let cloned = client.clone();
        client.update_config(ConfigUpdate {
            api_key: Some("new".to_string()),
            base_url: Some("http://b".to_string()),
        });

        let config = cloned.config.snapshot();
        let requests = [
            client.template().build_get("g"),
            client.template_data().build_get("g"),
            client.template_request().build_get("g"),
            client.user_api().build_get("g"),
            client.user().build_full_profile(),
        ];
        for req in requests {
            let http = build_http_request(&config, req);
            assert_eq!(http.header("authorization"), Some("Bearer new"));
            assert!(http.url.starts_with("http://b/"));
        }
    }
}
