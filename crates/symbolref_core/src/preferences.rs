//! Persisted UI language preference.
//!
//! # Invariants
//! - Reads never fail: missing, unknown or unreadable values fall back to the default language.
//! - The stored value is the bare language code (`zh`, `en`, `ja`).

use crate::model::language::Language;
use crate::store::{KeyValueStore, StoreResult, LANGUAGE_KEY};
use log::warn;

/// Returns the stored language, or [`Language::default`] when unavailable.
pub fn load_language(store: &dyn KeyValueStore) -> Language {
    match store.get(LANGUAGE_KEY) {
        Ok(Some(code)) => Language::parse(&code).unwrap_or_else(|| {
            warn!("event=preference_load module=preferences status=error error_code=unknown_language");
            Language::default()
        }),
        Ok(None) => Language::default(),
        Err(err) => {
            warn!(
                "event=preference_load module=preferences status=error error_code=read_failed error={err}"
            );
            Language::default()
        }
    }
}

/// Persists `language` immediately.
pub fn save_language(store: &dyn KeyValueStore, language: Language) -> StoreResult<()> {
    store.set(LANGUAGE_KEY, language.code())
}
