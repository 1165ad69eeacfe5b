use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use keyring::Entry;
use serde_json::Value;

use super::Storage;

const DEFAULT_SERVICE_NAME: &str = "charity-platform";

/// Storage backed by the OS keychain: one credential entry per key.
/// Entries are created once per key and reused.
pub struct KeyringStorage {
    service: String,
    entries: Mutex<HashMap<String, Arc<Entry>>>,
}

impl KeyringStorage {
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE_NAME)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entry(&self, key: &str) -> Result<Arc<Entry>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("Keychain entry cache lock poisoned"))?;
        if let Some(entry) = entries.get(key) {
            return Ok(entry.clone());
        }
        let entry = Arc::new(Entry::new(&self.service, key).context("Failed to create keyring entry")?);
        entries.insert(key.to_string(), entry.clone());
        Ok(entry)
    }
}

impl Default for KeyringStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for KeyringStorage {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        match self.entry(key)?.get_password() {
            Ok(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse keychain entry: {}", key))?;
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve value from keychain"),
        }
    }

    fn set_value(&self, key: &str, value: &Value) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.entry(key)?
            .set_password(&raw)
            .context("Failed to store value in keychain")
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete value from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageExt;

    fn mock_storage() -> KeyringStorage {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeyringStorage::with_service("charity-platform-test")
    }

    #[test]
    fn test_set_then_get() {
        let storage = mock_storage();
        storage.set("token", &"abc123").unwrap();
        storage.set("tokenExpiry", &1_760_000_000_000i64).unwrap();

        assert_eq!(storage.get::<String>("token").unwrap().as_deref(), Some("abc123"));
        assert_eq!(storage.get::<i64>("tokenExpiry").unwrap(), Some(1_760_000_000_000));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = mock_storage();
        assert!(storage.get_value("user").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = mock_storage();
        storage.set("token", &"abc123").unwrap();

        storage.remove("token").unwrap();
        assert!(storage.get_value("token").unwrap().is_none());
        storage.remove("token").unwrap();
    }

    #[test]
    fn test_session_over_keychain() {
        use crate::auth::Session;
        use chrono::{Duration, Utc};

        let session = Session::new(Arc::new(mock_storage()));
        session
            .start("tok", &serde_json::json!({"id": 7}), Utc::now() + Duration::hours(1))
            .unwrap();
        assert!(session.is_authenticated());

        session.logout();
        assert!(session.token().is_none());
    }
}
