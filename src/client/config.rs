use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    pub fn new(app: AppConfig) -> Self {
        Self { app }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Read `CLIENT_API_URL`, `BOARDFLOW_ORG_ID` and `BOARDFLOW_USER_ID`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();
        if let Some(url) = lookup("CLIENT_API_URL") {
            builder = builder.server_url(url);
        }
        if let Some(org_id) = lookup("BOARDFLOW_ORG_ID") {
            builder = builder.org_id(org_id);
        }
        if let Some(user_id) = lookup("BOARDFLOW_USER_ID") {
            builder = builder.user_id(user_id);
        }
        Self::with_builder(builder)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url().trim_end_matches('/'), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Organization sent as `x-org-id`
    pub fn org_id(&self) -> Result<&str, ConfigError> {
        self.app.org_id.as_deref().ok_or(ConfigError::MissingValue("org_id"))
    }

    /// User sent as `x-user-id`
    pub fn user_id(&self) -> Result<&str, ConfigError> {
        self.app.user_id.as_deref().ok_or(ConfigError::MissingValue("user_id"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.app.request_timeout_secs)
    }
}
