//! Application configuration management.
//!
//! Holds the API base URL, request timeout and the directory used for
//! session storage. Configuration is stored at
//! `~/.config/charity-platform/config.json`; environment variables override
//! individual fields.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{FileStorage, KeyringStorage, Storage};

/// Application name used for config/storage directory paths
const APP_NAME: &str = "charity-platform";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "CHARITY_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "CHARITY_TIMEOUT_SECS";
pub const ENV_STORAGE_DIR: &str = "CHARITY_STORAGE_DIR";
pub const ENV_STORAGE_BACKEND: &str = "CHARITY_STORAGE_BACKEND";

/// Where session state is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under `storage_dir`
    #[default]
    File,
    /// OS keychain
    Keychain,
}

impl StorageBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Some(StorageBackend::File),
            "keychain" => Some(StorageBackend::Keychain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub storage_dir: Option<PathBuf>,
    pub storage_backend: StorageBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            storage_dir: None,
            storage_backend: StorageBackend::default(),
        }
    }
}

impl Config {
    /// Load the config file (defaults if missing) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|d| !d.trim().is_empty()) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_STORAGE_BACKEND) {
            match StorageBackend::parse(&raw) {
                Some(backend) => self.storage_backend = backend,
                None => warn!(value = %raw, "Ignoring invalid {}", ENV_STORAGE_BACKEND),
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the file storage adapter.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find local data directory"))?;
        Ok(data_dir.join(APP_NAME).join("storage"))
    }

    /// Open the configured storage adapter.
    pub fn open_storage(&self) -> Result<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match self.storage_backend {
            StorageBackend::File => Arc::new(FileStorage::new(self.storage_dir()?)?),
            StorageBackend::Keychain => Arc::new(KeyringStorage::new()),
        };
        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            (ENV_API_URL, "https://api.example.org"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_STORAGE_DIR, "/tmp/charity"),
        ]));
        assert_eq!(config.api_base_url, "https://api.example.org");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/charity")));
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/charity"));
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[(ENV_TIMEOUT_SECS, "soon"), (ENV_API_URL, " ")]));
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_storage_backend_override() {
        let mut config = Config::default();
        assert_eq!(config.storage_backend, StorageBackend::File);

        config.apply_overrides(lookup_from(&[(ENV_STORAGE_BACKEND, " Keychain ")]));
        assert_eq!(config.storage_backend, StorageBackend::Keychain);

        config.apply_overrides(lookup_from(&[(ENV_STORAGE_BACKEND, "vault")]));
        assert_eq!(config.storage_backend, StorageBackend::Keychain);
    }

    #[test]
    fn test_storage_backend_from_file() {
        let config: Config = serde_json::from_str(r#"{"storage_backend": "keychain"}"#).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Keychain);
    }

    #[test]
    fn test_open_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage_dir: Some(dir.path().join("session")),
            ..Config::default()
        };
        let storage = config.open_storage().unwrap();
        storage.set_value("token", &serde_json::json!("tok")).unwrap();
        assert!(dir.path().join("session").join("token.json").exists());
    }

    #[test]
    fn test_open_keychain_storage() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        let config = Config {
            storage_backend: StorageBackend::Keychain,
            ..Config::default()
        };
        let storage = config.open_storage().unwrap();
        assert!(storage.get_value("token").unwrap().is_none());
    }

    #[test]
    fn test_load_file_missing_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file_partial_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base_url": "https://charity.test/api"}"#).unwrap();
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.api_base_url, "https://charity.test/api");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
