//! Client configuration loaded via OrthoConfig.
//!
//! Values layer defaults, configuration files, and `REGISTRY_*` environment
//! variables. Command-line flags on the binary override the loaded values.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::flows::DEFAULT_CATALOG_PAGE;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_DIR: &str = ".registry-client";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the registry and persisting the session.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ClientSettings {
    /// Registry base URL.
    pub base_url: Option<String>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Page navigated to after a successful login.
    pub catalog_page: Option<String>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

/// Errors raised while resolving settings into usable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The base URL does not parse.
    #[error("invalid registry base URL '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The timeout is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

impl ClientSettings {
    /// Registry base URL, falling back to the local development registry.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let value = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(value).map_err(|error| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            message: error.to_string(),
        })
    }

    /// Session directory, falling back to `.registry-client`.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Request timeout, falling back to thirty seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn timeout(&self) -> Result<Duration, SettingsError> {
        match self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Catalog page path, falling back to `/models.html`.
    pub fn catalog_page(&self) -> &str {
        self.catalog_page.as_deref().unwrap_or(DEFAULT_CATALOG_PAGE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "REGISTRY_BASE_URL",
        "REGISTRY_SESSION_DIR",
        "REGISTRY_TIMEOUT_SECS",
        "REGISTRY_CATALOG_PAGE",
        "REGISTRY_JSON_LOGS",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("registry-client")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("default URL").as_str(),
            "http://localhost:8000/"
        );
        assert_eq!(settings.session_dir(), PathBuf::from(DEFAULT_SESSION_DIR));
        assert_eq!(settings.timeout(), Ok(Duration::from_secs(30)));
        assert_eq!(settings.catalog_page(), "/models.html");
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("REGISTRY_BASE_URL", Some("https://registry.example/api".to_owned())),
            ("REGISTRY_SESSION_DIR", Some("/tmp/registry-state".to_owned())),
            ("REGISTRY_TIMEOUT_SECS", Some("5".to_owned())),
            ("REGISTRY_CATALOG_PAGE", Some("/catalog.html".to_owned())),
            ("REGISTRY_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("configured URL").as_str(),
            "https://registry.example/api"
        );
        assert_eq!(settings.session_dir(), PathBuf::from("/tmp/registry-state"));
        assert_eq!(settings.timeout(), Ok(Duration::from_secs(5)));
        assert_eq!(settings.catalog_page(), "/catalog.html");
        assert!(settings.json_logs);
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env([
            ("REGISTRY_BASE_URL", Some("not a url".to_owned())),
            ("REGISTRY_TIMEOUT_SECS", Some("0".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.base_url(),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
        assert_eq!(settings.timeout(), Err(SettingsError::ZeroTimeout));
    }
}
