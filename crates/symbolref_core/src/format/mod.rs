//! Copy-as-format encoder.
//!
//! # Responsibility
//! - Render one symbol into each textual representation offered by the copy menu.
//! - Bucket formats into the menu groups shown to users.
//!
//! # Invariants
//! - Encoding is pure and infallible: the code point was validated at load time.
//! - `Java` and `Json` produce identical text, as do `HtmlDecimal` and `Xml`.
//! - Zero-padded forms (`Python`, `Java`, `Json`) use at least 4 hex digits.

pub mod latex;

use crate::model::language::Language;
use crate::model::symbol::Symbol;
use serde::{Deserialize, Serialize};

pub use latex::latex_command;

/// One entry of the copy menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFormat {
    /// Glyph verbatim.
    Symbol,
    /// `U+XXXX` label.
    Unicode,
    /// Base-10 code point.
    Decimal,
    /// `0x` + uppercase hex.
    Hex,
    /// `&#N;`
    HtmlDecimal,
    /// `&#xh;` with lowercase hex.
    HtmlHex,
    /// `content: "\h";`
    Css,
    /// `"\u{H}"`
    JavaScript,
    /// `'\uHHHH'`
    Python,
    /// `"\uHHHH"` (Java and C#).
    Java,
    Latex,
    /// Backticked glyph plus localized name.
    Markdown,
    /// XML/SVG numeric entity.
    Xml,
    Json,
}

impl CopyFormat {
    /// Every format in copy menu order.
    pub const ALL: [CopyFormat; 14] = [
        CopyFormat::Symbol,
        CopyFormat::Unicode,
        CopyFormat::Decimal,
        CopyFormat::Hex,
        CopyFormat::HtmlDecimal,
        CopyFormat::HtmlHex,
        CopyFormat::Css,
        CopyFormat::JavaScript,
        CopyFormat::Python,
        CopyFormat::Java,
        CopyFormat::Latex,
        CopyFormat::Markdown,
        CopyFormat::Xml,
        CopyFormat::Json,
    ];

    /// Stable key, also used by the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Unicode => "unicode",
            Self::Decimal => "decimal",
            Self::Hex => "hex",
            Self::HtmlDecimal => "html",
            Self::HtmlHex => "html_hex",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Latex => "latex",
            Self::Markdown => "markdown",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.key().eq_ignore_ascii_case(key))
    }

    /// Menu group this format is listed under.
    ///
    /// `Hex` and `Json` are encoded but not listed in any group.
    pub fn group(self) -> Option<FormatGroup> {
        match self {
            Self::Symbol | Self::Unicode | Self::Decimal => Some(FormatGroup::Common),
            Self::JavaScript | Self::Python | Self::Java => Some(FormatGroup::Programming),
            Self::HtmlDecimal | Self::HtmlHex | Self::Css | Self::Xml => Some(FormatGroup::Web),
            Self::Latex | Self::Markdown => Some(FormatGroup::Document),
            Self::Hex | Self::Json => None,
        }
    }
}

/// Copy menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatGroup {
    Common,
    Programming,
    Web,
    Document,
}

impl FormatGroup {
    /// Groups in menu order.
    pub const ALL: [FormatGroup; 4] = [
        FormatGroup::Common,
        FormatGroup::Programming,
        FormatGroup::Web,
        FormatGroup::Document,
    ];

    /// Members of this group in menu order.
    pub fn formats(self) -> &'static [CopyFormat] {
        match self {
            Self::Common => &[CopyFormat::Symbol, CopyFormat::Unicode, CopyFormat::Decimal],
            Self::Programming => &[CopyFormat::JavaScript, CopyFormat::Python, CopyFormat::Java],
            Self::Web => &[
                CopyFormat::HtmlDecimal,
                CopyFormat::HtmlHex,
                CopyFormat::Css,
                CopyFormat::Xml,
            ],
            Self::Document => &[CopyFormat::Latex, CopyFormat::Markdown],
        }
    }
}

/// Encodes `symbol` into `format`.
///
/// `language` only affects [`CopyFormat::Markdown`], which embeds the
/// localized symbol name.
pub fn encode(symbol: &Symbol, format: CopyFormat, language: Language) -> String {
    let value = symbol.unicode.value();
    match format {
        CopyFormat::Symbol => symbol.symbol.clone(),
        CopyFormat::Unicode => symbol.unicode.to_string(),
        CopyFormat::Decimal => value.to_string(),
        CopyFormat::Hex => format!("0x{value:04X}"),
        CopyFormat::HtmlDecimal | CopyFormat::Xml => format!("&#{value};"),
        CopyFormat::HtmlHex => format!("&#x{value:04x};"),
        CopyFormat::Css => format!("content: \"\\{value:04x}\";"),
        CopyFormat::JavaScript => format!("\"\\u{{{}}}\"", symbol.unicode.hex_digits()),
        CopyFormat::Python => format!("'\\u{value:04X}'"),
        CopyFormat::Java | CopyFormat::Json => format!("\"\\u{value:04X}\""),
        CopyFormat::Latex => latex_command(&symbol.symbol).into_owned(),
        CopyFormat::Markdown => format!(
            "`{}` ({})",
            symbol.symbol,
            symbol.display_name(language)
        ),
    }
}

/// Encodes `symbol` into every format, in menu order.
pub fn encode_all(symbol: &Symbol, language: Language) -> Vec<(CopyFormat, String)> {
    CopyFormat::ALL
        .into_iter()
        .map(|format| (format, encode(symbol, format, language)))
        .collect()
}

/// Concatenates glyphs in selection order for batch copy.
pub fn batch_text<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> String {
    symbols
        .into_iter()
        .map(|symbol| symbol.symbol.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{batch_text, encode, encode_all, CopyFormat, FormatGroup};
    use crate::model::code_point::CodePoint;
    use crate::model::language::Language;
    use crate::model::symbol::Symbol;

    fn symbol(id: &str, label: &str, name: &str) -> Symbol {
        Symbol::new(id, CodePoint::parse(label).unwrap(), name, "misc").unwrap()
    }

    #[test]
    fn heart_encodes_to_expected_forms() {
        let heart = symbol("heart", "U+2764", "爱心");
        let lang = Language::Zh;

        assert_eq!(encode(&heart, CopyFormat::Symbol, lang), "❤");
        assert_eq!(encode(&heart, CopyFormat::Unicode, lang), "U+2764");
        assert_eq!(encode(&heart, CopyFormat::Decimal, lang), "10084");
        assert_eq!(encode(&heart, CopyFormat::Hex, lang), "0x2764");
        assert_eq!(encode(&heart, CopyFormat::HtmlDecimal, lang), "&#10084;");
        assert_eq!(encode(&heart, CopyFormat::HtmlHex, lang), "&#x2764;");
        assert_eq!(encode(&heart, CopyFormat::Css, lang), "content: \"\\2764\";");
        assert_eq!(encode(&heart, CopyFormat::JavaScript, lang), "\"\\u{2764}\"");
        assert_eq!(encode(&heart, CopyFormat::Python, lang), "'\\u2764'");
        assert_eq!(encode(&heart, CopyFormat::Java, lang), "\"\\u2764\"");
        assert_eq!(encode(&heart, CopyFormat::Json, lang), "\"\\u2764\"");
        assert_eq!(encode(&heart, CopyFormat::Xml, lang), "&#10084;");
        assert_eq!(encode(&heart, CopyFormat::Latex, lang), "\\text{❤}");
        assert_eq!(encode(&heart, CopyFormat::Markdown, lang), "`❤` (爱心)");
    }

    #[test]
    fn hex_entity_and_css_use_lowercase_digits() {
        let alpha = symbol("alpha", "U+03B1", "阿尔法");
        assert_eq!(encode(&alpha, CopyFormat::HtmlHex, Language::En), "&#x03b1;");
        assert_eq!(encode(&alpha, CopyFormat::Css, Language::En), "content: \"\\03b1\";");
        assert_eq!(encode(&alpha, CopyFormat::Hex, Language::En), "0x03B1");
        assert_eq!(encode(&alpha, CopyFormat::Latex, Language::En), "\\alpha");
    }

    #[test]
    fn astral_code_points_keep_all_digits() {
        let grin = symbol("grin", "U+1F600", "笑脸");
        assert_eq!(encode(&grin, CopyFormat::JavaScript, Language::Zh), "\"\\u{1F600}\"");
        assert_eq!(encode(&grin, CopyFormat::Python, Language::Zh), "'\\u1F600'");
        assert_eq!(encode(&grin, CopyFormat::Decimal, Language::Zh), "128512");
    }

    #[test]
    fn markdown_uses_localized_name_with_base_fallback() {
        let mut heart = symbol("heart", "U+2764", "爱心");
        heart.name_en = Some("Heart".to_string());

        assert_eq!(encode(&heart, CopyFormat::Markdown, Language::En), "`❤` (Heart)");
        assert_eq!(encode(&heart, CopyFormat::Markdown, Language::Ja), "`❤` (爱心)");
    }

    #[test]
    fn encode_all_follows_menu_order() {
        let heart = symbol("heart", "U+2764", "爱心");
        let formats = encode_all(&heart, Language::Zh)
            .into_iter()
            .map(|(format, _)| format)
            .collect::<Vec<_>>();
        assert_eq!(formats, CopyFormat::ALL.to_vec());
    }

    #[test]
    fn groups_match_copy_menu_sections() {
        for group in FormatGroup::ALL {
            for format in group.formats() {
                assert_eq!(format.group(), Some(group));
            }
        }
        assert_eq!(CopyFormat::Hex.group(), None);
        assert_eq!(CopyFormat::Json.group(), None);

        let listed = FormatGroup::ALL
            .iter()
            .map(|group| group.formats().len())
            .sum::<usize>();
        assert_eq!(listed, CopyFormat::ALL.len() - 2);
    }

    #[test]
    fn format_keys_roundtrip() {
        for format in CopyFormat::ALL {
            assert_eq!(CopyFormat::from_key(format.key()), Some(format));
        }
        assert_eq!(CopyFormat::from_key("HTML"), Some(CopyFormat::HtmlDecimal));
        assert_eq!(CopyFormat::from_key("yaml"), None);
    }

    #[test]
    fn batch_text_joins_glyphs_in_order() {
        let heart = symbol("heart", "U+2764", "爱心");
        let sun = symbol("sun", "U+2600", "太阳");
        assert_eq!(batch_text([&sun, &heart]), "☀❤");
        assert_eq!(batch_text(std::iter::empty::<&Symbol>()), "");
    }
}
