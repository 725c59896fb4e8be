//! Configuration management

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wishkit_transport::http::WishApiClientConfig;

/// Whether a wish may be submitted without a description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionPolicy {
    #[default]
    Optional,
    Required,
}

/// Limits a draft is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLimits {
    pub title_limit: usize,
    pub description_limit: usize,
    pub description_policy: DescriptionPolicy,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            title_limit: DEFAULT_TITLE_LIMIT,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            description_policy: DescriptionPolicy::Optional,
        }
    }
}

pub const DEFAULT_TITLE_LIMIT: usize = 50;
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 500;

/// WishKit client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishKitConfig {
    /// Base URL of the wish backend
    pub api_base_url: String,

    /// API key of the host app
    pub api_key: String,

    /// Maximum title length in characters
    pub title_limit: usize,

    /// Maximum description length in characters
    pub description_limit: usize,

    pub description_policy: DescriptionPolicy,

    /// Identity file; `~/.wishkit/identity.json` when unset
    pub identity_path: Option<PathBuf>,

    /// Request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for WishKitConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            api_key: String::new(),
            title_limit: DEFAULT_TITLE_LIMIT,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            description_policy: DescriptionPolicy::Optional,
            identity_path: None,
            request_timeout_secs: 30,
        }
    }
}

impl WishKitConfig {
    /// Load config from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WishKitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> Result<PathBuf> {
        Ok(wishkit_dir()?.join("config.toml"))
    }

    /// Initialize config directory and file
    pub fn init() -> Result<PathBuf> {
        let config_path = Self::default_path()?;
        Self::init_at(&config_path)?;
        Ok(config_path)
    }

    /// Create `path` with default settings unless it already exists
    pub fn init_at(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            WishKitConfig::default().save(path)?;
        }

        Ok(())
    }

    /// Resolved identity file location
    pub fn identity_path(&self) -> Result<PathBuf> {
        match &self.identity_path {
            Some(path) => Ok(path.clone()),
            None => Ok(wishkit_dir()?.join("identity.json")),
        }
    }

    pub fn draft_limits(&self) -> DraftLimits {
        DraftLimits {
            title_limit: self.title_limit,
            description_limit: self.description_limit,
            description_policy: self.description_policy,
        }
    }

    pub fn http_client_config(&self) -> WishApiClientConfig {
        WishApiClientConfig::default().with_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

fn wishkit_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Failed to get home directory"))?;
    Ok(home.join(".wishkit"))
}
