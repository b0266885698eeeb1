//! Type-as-you-search symbol filter.
//!
//! # Invariants
//! - Blank text disables text matching; only the category filter applies.
//! - Matching is case-insensitive except on the glyph itself.
//! - Localized names are only searched for the active language.

use crate::model::language::Language;
use crate::model::symbol::Symbol;

/// Category and free-text filter over the symbol list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolFilter {
    /// Restricts results to one category id.
    pub category: Option<String>,
    /// User query text.
    pub text: String,
    /// Active UI language; selects which localized name is searched.
    pub language: Language,
}

impl SymbolFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category = Some(category_id.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Returns whether `symbol` passes both the category and the text filter.
    pub fn matches(&self, symbol: &Symbol) -> bool {
        if let Some(category) = &self.category {
            if symbol.category != *category {
                return false;
            }
        }

        let query = self.text.trim();
        if query.is_empty() {
            return true;
        }
        let folded = query.to_lowercase();

        let localized_name = match self.language {
            Language::Zh => None,
            Language::En => symbol.name_en.as_deref(),
            Language::Ja => symbol.name_ja.as_deref(),
        };

        contains_folded(&symbol.name, &folded)
            || localized_name.is_some_and(|name| contains_folded(name, &folded))
            || symbol.symbol.contains(folded.as_str())
            || contains_folded(&symbol.unicode.to_string(), &folded)
            || contains_folded(&symbol.category, &folded)
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
