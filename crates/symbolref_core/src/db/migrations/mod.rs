//! Ordered schema scripts for the state database.
//!
//! Script `n` in [`SCRIPTS`] brings the schema to version `n + 1`; the applied
//! version is kept in `PRAGMA user_version`. Scripts are append-only.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

const SCRIPTS: [&str; 1] = [include_str!("0001_kv_entries.sql")];

/// Schema version produced by the newest script this build ships.
pub fn latest_version() -> u32 {
    SCRIPTS.len() as u32
}

/// Brings `conn` up to [`latest_version`] and returns how many scripts ran.
///
/// All pending scripts share one transaction.
///
/// # Errors
/// - [`StoreError::UnsupportedSchemaVersion`] when a newer build wrote the file.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<usize> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    if found > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    let pending = &SCRIPTS[found as usize..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (offset, script) in pending.iter().enumerate() {
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", found + offset as u32 + 1)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={found} to_version={latest}"
    );
    Ok(pending.len())
}
