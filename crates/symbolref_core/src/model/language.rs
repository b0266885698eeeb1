//! Display languages and localized field selection.
//!
//! # Invariants
//! - Wire codes are `zh`, `en` and `ja`; `zh` is the default UI language.
//! - Localized lookup never returns an empty choice when a base value exists.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// UI language supported by the symbol tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Simplified Chinese. Base dataset fields are written in this language.
    #[default]
    Zh,
    En,
    Ja,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Zh, Language::En, Language::Ja];

    /// Parses a stored or user-supplied language code (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }

    /// Stable wire code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Picks the locale-specific value when present, else the base value.
///
/// `Zh` always reads the base value.
pub fn localized<'a>(
    language: Language,
    base: &'a str,
    en: Option<&'a str>,
    ja: Option<&'a str>,
) -> &'a str {
    let preferred = match language {
        Language::Zh => None,
        Language::En => en,
        Language::Ja => ja,
    };
    preferred.filter(|value| !value.is_empty()).unwrap_or(base)
}
