//! SQLite-backed key-value store.

use super::{validate_key, KeyValueStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store persisted in the `kv_entries` table.
///
/// Owns its connection so it can be handed to a worker thread.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (and migrates) a state database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory state database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    #[cfg(test)]
    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn set_get_and_overwrite() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("language").unwrap(), None);

        store.set("language", "en").unwrap();
        assert_eq!(store.get("language").unwrap().as_deref(), Some("en"));

        store.set("language", "ja").unwrap();
        assert_eq!(store.get("language").unwrap().as_deref(), Some("ja"));
        assert_eq!(store.keys().unwrap(), vec!["language".to_string()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn writes_to_read_only_database_map_to_read_only() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("language", "en").unwrap();
        store
            .conn
            .pragma_update(None, "query_only", true)
            .unwrap();

        assert!(matches!(
            store.set("language", "ja").unwrap_err(),
            StoreError::ReadOnly
        ));
        assert_eq!(store.get("language").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn blank_keys_are_rejected() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        let err = store.set("  ", "v").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
