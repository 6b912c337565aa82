use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::SweeprError;

/// Base URL of the hosted dashboard backend, used unless overridden in config.
pub const DEFAULT_API_URL: &str = "https://app.sweepr.dev";

/// Top-level sweepr configuration, stored at `~/.sweepr/config.toml`.
///
/// Tokens never live here; they go through the credential store. The email
/// and login timestamp are kept so `sweepr status` works without touching
/// the keychain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard backend base URL override.
    #[serde(default)]
    pub api_url: Option<Url>,

    /// Publishable API key sent alongside authenticated requests.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Email of the logged-in account.
    #[serde(default)]
    pub email: Option<String>,

    /// When the current session was established.
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,

    /// Directories scanned by `sweepr scan-all`.
    #[serde(default)]
    pub scan_paths: Vec<PathBuf>,

    /// Maximum directory depth for filesystem scanning.
    #[serde(default = "default_max_scan_depth")]
    pub max_scan_depth: usize,

    /// Upper bound on concurrent directory traversals during a scan.
    #[serde(default = "default_scan_concurrency")]
    pub scan_concurrency: usize,
}

fn default_max_scan_depth() -> usize {
    5
}

fn default_scan_concurrency() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            email: None,
            logged_in_at: None,
            scan_paths: Vec::new(),
            max_scan_depth: 5,
            scan_concurrency: 64,
        }
    }
}

impl Config {
    /// Returns the sweepr home directory (`~/.sweepr/`).
    pub fn home_dir() -> Result<PathBuf, SweeprError> {
        let base = dirs::home_dir().ok_or_else(|| SweeprError::Config {
            message: "could not determine home directory".into(),
        })?;
        Ok(base.join(".sweepr"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf, SweeprError> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// The dashboard base URL, falling back to [`DEFAULT_API_URL`].
    pub fn api_base(&self) -> Url {
        self.api_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, SweeprError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, SweeprError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SweeprError::Serialization(e.to_string()))
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<(), SweeprError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), SweeprError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SweeprError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
