//! Durable key-value storage for UI state.
//!
//! # Responsibility
//! - Define the small key-value contract favorites and preferences persist through.
//! - Isolate SQLite details from the favorites index.
//!
//! # Invariants
//! - Values are opaque UTF-8 strings; callers own the encoding.
//! - `set` replaces any previous value for the key.

use rusqlite::ffi::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Key holding the JSON array of favorited symbols.
pub const FAVORITES_KEY: &str = "unicode-favorites";
/// Key holding the preferred UI language code.
pub const LANGUAGE_KEY: &str = "language";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The state database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Store rejects writes (read-only media, revoked storage access).
    ReadOnly,
    /// Shared in-process state became unusable after a panic.
    Poisoned,
    InvalidKey(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "state database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ReadOnly => write!(f, "store is read-only"),
            Self::Poisoned => write!(f, "store state is poisoned"),
            Self::InvalidKey(key) => write!(f, "invalid store key `{key}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ReadOnly => {
                Self::ReadOnly
            }
            _ => Self::Sqlite(value),
        }
    }
}

/// Minimal durable key-value contract.
///
/// Implementations are moved into the favorites persist worker, hence `Send`.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

fn validate_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
