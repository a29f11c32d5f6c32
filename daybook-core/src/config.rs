//! Global configuration at ~/.config/daybook/config.toml
//!
//! Every field has a default so a missing file works out of the box.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{DaybookError, DaybookResult};

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daybook")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Where the local tables live.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the remote event API. No remote sync when unset.
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Endpoint of the natural-language assistant. The chat flow is
    /// unavailable when unset.
    #[serde(default)]
    pub assistant_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            remote_url: None,
            assistant_url: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("daybook").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when absent.
    /// `DAYBOOK_DATA_DIR` overrides the data directory either way.
    pub fn load() -> DaybookResult<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents).map_err(|e| {
                DaybookError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            AppConfig::default()
        };

        if let Ok(dir) = std::env::var("DAYBOOK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.remote_url.is_none());
        assert!(config.assistant_url.is_none());
        assert!(config.data_dir.ends_with("daybook"));
    }

    #[test]
    fn full_toml_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/tmp/daybook-test"
            remote_url = "http://127.0.0.1:4280"
            assistant_url = "http://127.0.0.1:4280/api/ai"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/daybook-test"));
        assert_eq!(config.remote_url.as_deref(), Some("http://127.0.0.1:4280"));
    }
}
