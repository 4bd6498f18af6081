//! Configuration for the remote platform connection and folder mirroring
//!
//! Loaded from `CLIENTFLOW_CONFIG` or `~/.config/clientflow/config.toml`,
//! then overridden by environment variables.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CLIENTFLOW_CONFIG";
pub const BASE_URL_ENV: &str = "N8N_BASE_URL";
pub const API_KEY_ENV: &str = "N8N_API_KEY";
pub const TIMEOUT_ENV: &str = "CLIENTFLOW_TIMEOUT_SECS";
pub const MIRROR_TAGS_ENV: &str = "CLIENTFLOW_MIRROR_TAGS";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientFlowConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub folders: FolderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Instance root, e.g. `https://n8n.example.com` (the `/api/v1` prefix is added)
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `<base_url>/api/v1` without a trailing slash
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.base_url.trim().trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config(format!(
                "remote base URL is not set (config [remote] base_url or {BASE_URL_ENV})"
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Config(format!(
                "remote API key is not set (config [remote] api_key or {API_KEY_ENV})"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderConfig {
    /// Mirror folder assignments into remote workflow tags
    #[serde(default)]
    pub mirror_tags: bool,
}

fn default_timeout_secs() -> u64 {
    10
}

impl ClientFlowConfig {
    /// Load from the configured file (if any), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            CoreError::Config(format!("Failed to read config {}: {}", path.display(), err))
        })?;
        toml::from_str(&contents).map_err(|err| {
            CoreError::Config(format!("Failed to parse config {}: {}", path.display(), err))
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clientflow").join("config.toml"))
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.remote.base_url = url;
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.remote.api_key = key;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.remote.timeout_secs = secs;
        }
        if let Some(flag) = lookup(MIRROR_TAGS_ENV) {
            self.folders.mirror_tags = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[remote]
base_url = "https://n8n.example.com/"
api_key = "secret"

[folders]
mirror_tags = true
"#,
        )
        .unwrap();

        let config = ClientFlowConfig::load_from_path(&path).unwrap();
        assert_eq!(config.remote.api_root(), "https://n8n.example.com/api/v1");
        assert_eq!(config.remote.timeout_secs, 10);
        assert!(config.folders.mirror_tags);
        assert!(config.remote.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[remote\nbase_url = ").unwrap();
        let err = ClientFlowConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV, "http://localhost:5678"),
            (TIMEOUT_ENV, "3"),
            (MIRROR_TAGS_ENV, "yes"),
        ]);
        let mut config = ClientFlowConfig::default();
        config.remote.api_key = "from-file".to_string();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.remote.base_url, "http://localhost:5678");
        assert_eq!(config.remote.api_key, "from-file");
        assert_eq!(config.remote.timeout(), Duration::from_secs(3));
        assert!(config.folders.mirror_tags);
    }

    #[test]
    fn test_validate_reports_missing_credentials() {
        let missing_url = RemoteConfig::new("", "key");
        let missing_key = RemoteConfig::new("http://localhost:5678", " ");
        assert!(matches!(missing_url.validate(), Err(CoreError::Config(_))));
        assert!(matches!(missing_key.validate(), Err(CoreError::Config(_))));
    }
}
