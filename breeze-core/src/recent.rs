//! Most-recent-first list of searched locations, written through to storage.

use anyhow::{Context, Result};

use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded list.
pub const STORAGE_KEY: &str = "recentSearches";

pub const CAPACITY: usize = 10;

#[derive(Debug)]
pub struct RecentSearches {
    entries: Vec<String>,
    store: Box<dyn KeyValueStore>,
}

impl RecentSearches {
    /// Restore the list from `store`. Absent or unreadable data starts empty.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unparseable recent searches: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read recent searches: {e:#}");
                Vec::new()
            }
        };

        Self { entries, store }
    }

    pub fn all(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, location: &str) -> bool {
        self.entries.iter().any(|e| e == location)
    }

    /// Move `location` to the front (inserting it if new) and keep at most
    /// [`CAPACITY`] entries.
    ///
    /// The in-memory list is updated even when persisting fails.
    pub fn add(&mut self, location: &str) -> Result<()> {
        self.entries.retain(|e| e != location);
        self.entries.insert(0, location.to_string());
        self.entries.truncate(CAPACITY);
        self.persist()
    }

    /// Drop every occurrence of `location`. Persists even when nothing changed.
    pub fn remove(&mut self, location: &str) -> Result<()> {
        self.entries.retain(|e| e != location);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let json =
            serde_json::to_string(&self.entries).context("Failed to serialize recent searches")?;
        self.store.set(STORAGE_KEY, &json).context("Failed to persist recent searches")
    }
}
