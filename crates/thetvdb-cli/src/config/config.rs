//! `AppConfig` struct, TOML read/write and environment overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thetvdb_api::model::Credentials;

/// Environment variable overriding `auth.api_key`.
pub const ENV_API_KEY: &str = "THETVDB_API_KEY";
/// Environment variable overriding `auth.username`.
pub const ENV_USERNAME: &str = "THETVDB_USERNAME";
/// Environment variable overriding `auth.user_key`.
pub const ENV_USER_KEY: &str = "THETVDB_USER_KEY";
/// Environment variable overriding `auth.token`.
pub const ENV_TOKEN: &str = "THETVDB_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Credentials used for `/login`.
    #[serde(default)]
    pub auth: AuthConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Login credentials.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Account user name (needed for `user` commands).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Account unique key (needed for `user` commands).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    /// Token saved by `login --save`; used instead of logging in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// HTTP client settings.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// `Accept-Language` (e.g. "en", "nl").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Replaces credentials and token with non-empty values from `lookup`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(api_key) = non_empty(ENV_API_KEY) {
            self.auth.api_key = Some(api_key);
        }
        if let Some(username) = non_empty(ENV_USERNAME) {
            self.auth.username = Some(username);
        }
        if let Some(user_key) = non_empty(ENV_USER_KEY) {
            self.auth.user_key = Some(user_key);
        }
        if let Some(token) = non_empty(ENV_TOKEN) {
            self.auth.token = Some(token);
        }
        self
    }

    /// Builds login credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = self.auth.api_key.clone().with_context(|| {
            format!("an API key is required: set {ENV_API_KEY} or auth.api_key in config.toml")
        })?;
        let mut credentials = Credentials::new(api_key);
        credentials.username.clone_from(&self.auth.username);
        credentials.user_key.clone_from(&self.auth.user_key);
        Ok(credentials)
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.client.timeout_secs.map(Duration::from_secs)
    }
}
