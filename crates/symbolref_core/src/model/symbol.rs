//! Symbol and category records.
//!
//! # Responsibility
//! - Define the immutable records loaded from the symbol dataset.
//! - Validate each record while it is decoded so malformed data fails at load time.
//!
//! # Invariants
//! - `Symbol.unicode` is a validated [`CodePoint`].
//! - The first scalar of `Symbol.symbol` equals `Symbol.unicode`.
//! - `id` and base `name` are never empty.

use crate::model::code_point::CodePoint;
use crate::model::language::{localized, Language};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record-level validation failure for symbols and categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolValidationError {
    EmptyId,
    /// Record `id` has no base display name.
    EmptyName(String),
    /// Symbol `id` has an empty glyph.
    EmptyGlyph(String),
    /// Glyph does not start with the scalar named by `unicode`.
    GlyphMismatch {
        id: String,
        glyph: String,
        unicode: CodePoint,
    },
    /// Symbol `id` references an empty category key.
    EmptyCategory(String),
}

impl Display for SymbolValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id cannot be empty"),
            Self::EmptyName(id) => write!(f, "record `{id}` has an empty name"),
            Self::EmptyGlyph(id) => write!(f, "symbol `{id}` has an empty glyph"),
            Self::GlyphMismatch { id, glyph, unicode } => write!(
                f,
                "symbol `{id}` glyph `{glyph}` does not start with {unicode}"
            ),
            Self::EmptyCategory(id) => write!(f, "symbol `{id}` has an empty category"),
        }
    }
}

impl Error for SymbolValidationError {}

/// One browsable symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SymbolRecord")]
pub struct Symbol {
    /// Stable key, unique across the dataset.
    pub id: String,
    /// Literal glyph as copied to the clipboard.
    pub symbol: String,
    /// Canonical `U+XXXX` code point every encoded format derives from.
    pub unicode: CodePoint,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ja: Option<String>,
    /// Foreign key into `Category.id`.
    pub category: String,
}

#[derive(Deserialize)]
struct SymbolRecord {
    id: String,
    symbol: String,
    unicode: CodePoint,
    name: String,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_ja: Option<String>,
    category: String,
}

impl TryFrom<SymbolRecord> for Symbol {
    type Error = SymbolValidationError;

    fn try_from(record: SymbolRecord) -> Result<Self, Self::Error> {
        let symbol = Self {
            id: record.id,
            symbol: record.symbol,
            unicode: record.unicode,
            name: record.name,
            name_en: record.name_en,
            name_ja: record.name_ja,
            category: record.category,
        };
        symbol.validate()?;
        Ok(symbol)
    }
}

impl Symbol {
    /// Creates a symbol whose glyph is exactly `unicode`.
    ///
    /// Localized names start as `None`.
    pub fn new(
        id: impl Into<String>,
        unicode: CodePoint,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, SymbolValidationError> {
        let symbol = Self {
            id: id.into(),
            symbol: unicode.as_char().to_string(),
            unicode,
            name: name.into(),
            name_en: None,
            name_ja: None,
            category: category.into(),
        };
        symbol.validate()?;
        Ok(symbol)
    }

    /// Checks record-level invariants.
    ///
    /// Trailing scalars after the first (variation selectors, ZWJ sequences)
    /// are accepted.
    pub fn validate(&self) -> Result<(), SymbolValidationError> {
        if self.id.trim().is_empty() {
            return Err(SymbolValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(SymbolValidationError::EmptyName(self.id.clone()));
        }
        if self.category.trim().is_empty() {
            return Err(SymbolValidationError::EmptyCategory(self.id.clone()));
        }
        match self.symbol.chars().next() {
            None => Err(SymbolValidationError::EmptyGlyph(self.id.clone())),
            Some(first) if first != self.unicode.as_char() => {
                Err(SymbolValidationError::GlyphMismatch {
                    id: self.id.clone(),
                    glyph: self.symbol.clone(),
                    unicode: self.unicode,
                })
            }
            Some(_) => Ok(()),
        }
    }

    /// Display name for `language`, falling back to the base name.
    pub fn display_name(&self, language: Language) -> &str {
        localized(
            language,
            &self.name,
            self.name_en.as_deref(),
            self.name_ja.as_deref(),
        )
    }
}

/// Group of symbols shown under one navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ja: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ja: Option<String>,
}

#[derive(Deserialize)]
struct CategoryRecord {
    id: String,
    name: String,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_ja: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    description_en: Option<String>,
    #[serde(default)]
    description_ja: Option<String>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = SymbolValidationError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        let category = Self {
            id: record.id,
            name: record.name,
            name_en: record.name_en,
            name_ja: record.name_ja,
            description: record.description,
            description_en: record.description_en,
            description_ja: record.description_ja,
        };
        category.validate()?;
        Ok(category)
    }
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, SymbolValidationError> {
        let category = Self {
            id: id.into(),
            name: name.into(),
            name_en: None,
            name_ja: None,
            description: description.into(),
            description_en: None,
            description_ja: None,
        };
        category.validate()?;
        Ok(category)
    }

    pub fn validate(&self) -> Result<(), SymbolValidationError> {
        if self.id.trim().is_empty() {
            return Err(SymbolValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(SymbolValidationError::EmptyName(self.id.clone()));
        }
        Ok(())
    }

    pub fn display_name(&self, language: Language) -> &str {
        localized(
            language,
            &self.name,
            self.name_en.as_deref(),
            self.name_ja.as_deref(),
        )
    }

    pub fn display_description(&self, language: Language) -> &str {
        localized(
            language,
            &self.description,
            self.description_en.as_deref(),
            self.description_ja.as_deref(),
        )
    }
}
