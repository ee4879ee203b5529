//! Configuration for salesboard
//!
//! Loaded from `<config_dir>/salesboard/config.toml` (or an explicit path)
//! and merged with CLI / environment overrides. The backend section is
//! handed to the repository at construction time.
//!
//! ```toml
//! recent_sales_limit = 100
//! page_size = 10
//!
//! [backend]
//! url = "https://example.supabase.co"
//! anon_key = "..."
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted sales backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`
    pub url: String,

    /// Public (anon) API key sent as `apikey` and bearer token
    pub anon_key: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Reject configs that cannot reach a real backend
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.url.starts_with("https://") {
            return Err(CoreError::InvalidConfig {
                message: format!("backend url must start with https:// (got '{}')", self.url),
            });
        }
        if self.base_url().len() <= "https://".len() {
            return Err(CoreError::InvalidConfig {
                message: "backend url has no host".to_string(),
            });
        }
        if self.anon_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "backend anon_key is empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::InvalidConfig {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Top-level salesboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesboardConfig {
    /// Backend connection; `None` runs on the sample dataset
    pub backend: Option<BackendConfig>,

    /// Rows fetched for the recent sales listing
    pub recent_sales_limit: usize,

    /// Rows per page in the recent sales listing
    pub page_size: usize,
}

impl Default for SalesboardConfig {
    fn default() -> Self {
        Self {
            backend: None,
            recent_sales_limit: 100,
            page_size: 10,
        }
    }
}

impl SalesboardConfig {
    /// `<config_dir>/salesboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("salesboard").join("config.toml"))
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply CLI / environment overrides on top of the file values
    ///
    /// A url or key given alone fills in the missing half from the file.
    pub fn with_overrides(mut self, url: Option<String>, anon_key: Option<String>) -> Self {
        if url.is_none() && anon_key.is_none() {
            return self;
        }

        let backend = self
            .backend
            .get_or_insert_with(|| BackendConfig::new(String::new(), String::new()));
        if let Some(url) = url {
            backend.url = url;
        }
        if let Some(key) = anon_key {
            backend.anon_key = key;
        }
        self
    }

    /// Backend settings if present and valid
    ///
    /// Invalid settings are logged and treated as absent, which puts the
    /// service in sample mode.
    pub fn usable_backend(&self) -> Option<&BackendConfig> {
        let backend = self.backend.as_ref()?;
        match backend.validate() {
            Ok(()) => Some(backend),
            Err(e) => {
                tracing::warn!("Ignoring backend configuration: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = SalesboardConfig::from_toml(
            r#"
            recent_sales_limit = 50

            [backend]
            url = "https://demo.supabase.co/"
            anon_key = "key"
            "#,
        )
        .unwrap();

        assert_eq!(config.recent_sales_limit, 50);
        assert_eq!(config.page_size, 10);
        let backend = config.usable_backend().unwrap();
        assert_eq!(backend.base_url(), "https://demo.supabase.co");
        assert_eq!(backend.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation() {
        assert!(BackendConfig::new("https://demo.supabase.co", "key").is_valid());
        assert!(!BackendConfig::new("http://demo.supabase.co", "key").is_valid());
        assert!(!BackendConfig::new("https://", "key").is_valid());
        assert!(!BackendConfig::new("https://demo.supabase.co", "  ").is_valid());
    }

    #[test]
    fn test_overrides() {
        let config = SalesboardConfig::default()
            .with_overrides(Some("https://a.supabase.co".to_string()), None);
        let backend = config.backend.as_ref().unwrap();
        assert_eq!(backend.url, "https://a.supabase.co");
        assert!(config.usable_backend().is_none(), "missing key");

        let config = config.with_overrides(None, Some("secret".to_string()));
        assert!(config.usable_backend().is_some());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SalesboardConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, SalesboardConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();
        let err = SalesboardConfig::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }
}
