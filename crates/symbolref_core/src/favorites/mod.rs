//! Favorites index with debounced durable persistence.
//!
//! # Responsibility
//! - Keep the user's favorited symbols in insertion order with O(1) membership.
//! - Rehydrate from and persist to the durable key-value store.
//!
//! # Invariants
//! - `entries` and `ids` always describe the same set of symbol ids.
//! - No two entries share an id.
//! - Before `initialize()` completes nothing is a favorite and mutations are rejected.
//! - Every successful mutation schedules one full-snapshot write; bursts coalesce.
//!
//! # Lifecycle
//! `new` -> `initialize` -> ready (`add`/`remove`/`clear`/`toggle`) -> `dispose`.

mod persist;

use crate::model::symbol::Symbol;
use crate::store::{KeyValueStore, FAVORITES_KEY};
use log::{debug, info, warn};
use persist::PersistWorker;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Quiet period after the last mutation before a snapshot is written.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tuning knobs for [`FavoritesIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesOptions {
    pub debounce: Duration,
}

impl Default for FavoritesOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

#[derive(Debug)]
pub enum FavoritesError {
    /// `initialize()` has not completed.
    NotReady,
    AlreadyInitialized,
    /// Persist worker thread could not be started.
    WorkerSpawn(std::io::Error),
    /// An earlier `initialize()` failed to start the worker.
    Unavailable,
}

impl Display for FavoritesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "favorites index is not initialized"),
            Self::AlreadyInitialized => write!(f, "favorites index is already initialized"),
            Self::WorkerSpawn(err) => write!(f, "failed to start favorites persist worker: {err}"),
            Self::Unavailable => write!(f, "favorites persistence failed to start earlier"),
        }
    }
}

impl Error for FavoritesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

enum Lifecycle {
    Pending(Box<dyn KeyValueStore>),
    Ready(PersistWorker),
    /// The worker could not start; the store went down with it.
    Failed,
}

/// Ordered favorites collection owned by the application shell.
pub struct FavoritesIndex {
    entries: Vec<Symbol>,
    ids: HashSet<String>,
    lifecycle: Lifecycle,
    options: FavoritesOptions,
}

impl FavoritesIndex {
    /// Creates an empty, not yet initialized index over `store`.
    pub fn new(store: impl KeyValueStore + 'static, options: FavoritesOptions) -> Self {
        Self {
            entries: Vec::new(),
            ids: HashSet::new(),
            lifecycle: Lifecycle::Pending(Box::new(store)),
            options,
        }
    }

    /// Loads the persisted snapshot and starts the persist worker.
    ///
    /// A missing or unreadable snapshot yields an empty ready index; that
    /// case is logged, never returned. Returns the number of loaded entries.
    ///
    /// # Errors
    /// - [`FavoritesError::AlreadyInitialized`] on a second call.
    /// - [`FavoritesError::WorkerSpawn`] when the worker thread cannot start.
    /// - [`FavoritesError::Unavailable`] on any call after such a failure.
    pub fn initialize(&mut self) -> Result<usize, FavoritesError> {
        let store = match std::mem::replace(&mut self.lifecycle, Lifecycle::Failed) {
            Lifecycle::Pending(store) => store,
            Lifecycle::Failed => return Err(FavoritesError::Unavailable),
            ready @ Lifecycle::Ready(_) => {
                self.lifecycle = ready;
                return Err(FavoritesError::AlreadyInitialized);
            }
        };

        let started_at = Instant::now();
        let snapshot = read_snapshot(&*store);
        let worker = PersistWorker::spawn(store, FAVORITES_KEY, self.options.debounce)
            .map_err(FavoritesError::WorkerSpawn)?;

        for symbol in snapshot {
            if self.ids.insert(symbol.id.clone()) {
                self.entries.push(symbol);
            }
        }
        self.lifecycle = Lifecycle::Ready(worker);

        info!(
            "event=favorites_init module=favorites status=ok duration_ms={} count={}",
            started_at.elapsed().as_millis(),
            self.entries.len()
        );
        Ok(self.entries.len())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    /// O(1) membership test. Always `false` before initialization.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.is_ready() && self.ids.contains(id)
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> &[Symbol] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `symbol` unless its id is already present.
    pub fn add(&mut self, symbol: &Symbol) -> Result<AddOutcome, FavoritesError> {
        let worker = ready_worker(&self.lifecycle)?;
        if self.ids.contains(&symbol.id) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.ids.insert(symbol.id.clone());
        self.entries.push(symbol.clone());
        schedule_snapshot(worker, &self.entries);
        Ok(AddOutcome::Added)
    }

    /// Removes the entry with `id`. Absent ids do not trigger a write.
    pub fn remove(&mut self, id: &str) -> Result<RemoveOutcome, FavoritesError> {
        let worker = ready_worker(&self.lifecycle)?;
        if !self.ids.remove(id) {
            return Ok(RemoveOutcome::NotPresent);
        }

        self.entries.retain(|entry| entry.id != id);
        schedule_snapshot(worker, &self.entries);
        Ok(RemoveOutcome::Removed)
    }

    /// Adds or removes `symbol`; returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, symbol: &Symbol) -> Result<bool, FavoritesError> {
        if self.is_favorite(&symbol.id) {
            self.remove(&symbol.id)?;
            Ok(false)
        } else {
            self.add(symbol)?;
            Ok(true)
        }
    }

    /// Removes every entry in one step and schedules a write.
    pub fn clear(&mut self) -> Result<(), FavoritesError> {
        let worker = ready_worker(&self.lifecycle)?;
        self.entries.clear();
        self.ids.clear();
        schedule_snapshot(worker, &self.entries);
        Ok(())
    }

    /// Stops the persist worker after it writes any pending snapshot.
    ///
    /// Dropping the index instead closes the worker without waiting.
    pub fn dispose(self) {
        if let Lifecycle::Ready(worker) = self.lifecycle {
            worker.shutdown();
            debug!("event=favorites_dispose module=favorites status=ok");
        }
    }
}

fn ready_worker(lifecycle: &Lifecycle) -> Result<&PersistWorker, FavoritesError> {
    match lifecycle {
        Lifecycle::Ready(worker) => Ok(worker),
        _ => Err(FavoritesError::NotReady),
    }
}

fn read_snapshot(store: &dyn KeyValueStore) -> Vec<Symbol> {
    let raw = match store.get(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(
                "event=favorites_init module=favorites status=error error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=favorites_init module=favorites status=error error_code=snapshot_invalid error={err}"
            );
            return Vec::new();
        }
    };

    // Invalid records are skipped one by one; only a non-array snapshot is discarded whole.
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value::<Symbol>(record) {
            Ok(symbol) => Some(symbol),
            Err(err) => {
                warn!(
                    "event=favorites_init module=favorites status=skipped error_code=record_invalid position={position} error={err}"
                );
                None
            }
        })
        .collect()
}

fn schedule_snapshot(worker: &PersistWorker, entries: &[Symbol]) {
    match serde_json::to_string(entries) {
        Ok(snapshot) => worker.schedule(snapshot),
        Err(err) => warn!(
            "event=favorites_persist module=favorites status=error error_code=encode_failed error={err}"
        ),
    }
}
