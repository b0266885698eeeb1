//! Core logic for the Unicode symbol reference.
//! This crate owns the symbol data model, copy-format encoding and the
//! favorites index; UI layers only render what it returns.

pub mod dataset;
pub mod db;
pub mod favorites;
pub mod format;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod store;

pub use dataset::{
    CategoryCount, CategoryListing, DatasetError, DatasetResult, DatasetStats, SymbolDataset,
    SymbolFilter,
};
pub use favorites::{
    AddOutcome, FavoritesError, FavoritesIndex, FavoritesOptions, RemoveOutcome, DEFAULT_DEBOUNCE,
};
pub use format::{batch_text, encode, encode_all, latex_command, CopyFormat, FormatGroup};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::code_point::{CodePoint, CodePointError};
pub use model::language::{localized, Language};
pub use model::symbol::{Category, Symbol, SymbolValidationError};
pub use preferences::{load_language, save_language};
pub use store::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult, FAVORITES_KEY,
    LANGUAGE_KEY,
};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
