//! State database bootstrap: connection setup plus `user_version` migrations.
//!
//! Failures surface as [`crate::store::StoreError`]; the database only exists
//! to back the key-value stores.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
