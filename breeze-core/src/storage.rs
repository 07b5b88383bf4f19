//! String-keyed, string-valued durable storage.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

pub trait KeyValueStore: Send + Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// All keys live in a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "breeze", "breeze")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("storage.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage file: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // An unreadable file is replaced rather than blocking every later write.
        let mut all = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable storage file: {e:#}");
            BTreeMap::new()
        });
        all.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&all).context("Failed to serialize storage")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write storage file: {}", self.path.display()))?;

        Ok(())
    }
}

/// In-memory store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut map) = store.inner.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.inner.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.inner.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose writes always fail; reads return `initial`.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore {
    pub initial: Option<String>,
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(self.initial.clone())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}
