//! Key/value persistence for client-side session state.
//!
//! This module provides the `Storage` trait and its adapters:
//! - `MemoryStorage`: process-local map, used in tests and short-lived tools
//! - `FileStorage`: one JSON file per key in a directory (local storage on disk)
//! - `KeyringStorage`: values kept in the OS keychain
//!
//! Values are stored as JSON so any serde type can be persisted.

pub mod file;
pub mod keychain;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use file::FileStorage;
pub use keychain::KeyringStorage;

/// Key-addressed JSON store. Each call is atomic per key.
pub trait Storage: Send + Sync {
    fn get_value(&self, key: &str) -> Result<Option<Value>>;
    fn set_value(&self, key: &str, value: &Value) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed helpers layered over any `Storage`.
pub trait StorageExt: Storage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_value(key)? {
            Some(value) => {
                let typed = serde_json::from_value(value)
                    .with_context(|| format!("Stored value for '{}' has unexpected shape", key))?;
                Ok(Some(typed))
            }
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize value for '{}'", key))?;
        self.set_value(key, &value)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// In-memory storage. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("Memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: &Value) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("Memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("Memory storage lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
