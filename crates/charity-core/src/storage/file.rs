use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::Storage;

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers; anything path-like is flattened.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl Storage for FileStorage {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage entry: {}", key))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage entry: {}", key))?;
        Ok(Some(value))
    }

    fn set_value(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.entry_path(key);
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write storage entry: {}", key))?;
        debug!(key = key, "Storage entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage entry: {}", key))?;
        }
        Ok(())
    }
}
