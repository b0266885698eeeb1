//! In-process key-value store.

use super::{validate_key, KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    writes: usize,
}

/// Shared in-memory store.
///
/// Clones share the same entries, so one handle can be moved into the
/// favorites persist worker while another observes what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set`/`remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().map_or(0, |state| state.writes)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        let mut state = self.lock()?;
        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        let mut state = self.lock()?;
        state.entries.remove(key);
        state.writes += 1;
        Ok(())
    }
}
