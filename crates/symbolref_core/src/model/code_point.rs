//! Canonical `U+XXXX` code point labels.
//!
//! # Responsibility
//! - Parse dataset code point labels into validated Unicode scalars.
//! - Provide the hex digit and numeric views every copy format derives from.
//!
//! # Invariants
//! - The label is `U+` followed by 4-6 uppercase hex digits.
//! - No leading zeros beyond the 4-digit minimum (`U+00A9`, never `U+000A9`).
//! - The value is a Unicode scalar (not a surrogate, at most `U+10FFFF`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

static CODE_POINT_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^U\+([0-9A-F]{4,6})$").expect("valid code point regex"));

/// Reason a code point label was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodePointError {
    /// Label does not match `U+` + 4-6 uppercase hex digits.
    Malformed(String),
    /// Label carries more leading zeros than the 4-digit minimum.
    NonCanonical(String),
    /// Label names a surrogate or a value beyond `U+10FFFF`.
    NotScalar(String),
}

impl Display for CodePointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(label) => {
                write!(f, "code point `{label}` must look like U+XXXX (4-6 uppercase hex digits)")
            }
            Self::NonCanonical(label) => {
                write!(f, "code point `{label}` has leading zeros beyond 4 digits")
            }
            Self::NotScalar(label) => write!(f, "code point `{label}` is not a Unicode scalar"),
        }
    }
}

impl Error for CodePointError {}

/// Validated Unicode scalar carried as its `U+XXXX` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePoint(char);

impl CodePoint {
    /// Parses a canonical `U+XXXX` label.
    ///
    /// # Errors
    /// - [`CodePointError::Malformed`] for anything but `U+` + 4-6 uppercase hex digits.
    /// - [`CodePointError::NonCanonical`] for zero-padded labels longer than 4 digits.
    /// - [`CodePointError::NotScalar`] for surrogates and out-of-range values.
    pub fn parse(label: &str) -> Result<Self, CodePointError> {
        let digits = CODE_POINT_LABEL_RE
            .captures(label)
            .and_then(|captures| captures.get(1))
            .map(|digits| digits.as_str())
            .ok_or_else(|| CodePointError::Malformed(label.to_string()))?;

        if digits.len() > 4 && digits.starts_with('0') {
            return Err(CodePointError::NonCanonical(label.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| CodePointError::Malformed(label.to_string()))?;
        char::from_u32(value)
            .map(Self)
            .ok_or_else(|| CodePointError::NotScalar(label.to_string()))
    }

    /// Builds a code point directly from a scalar.
    pub fn from_char(value: char) -> Self {
        Self(value)
    }

    /// Numeric scalar value.
    pub fn value(self) -> u32 {
        u32::from(self.0)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Uppercase hex digits after `U+`, zero-padded to at least 4.
    pub fn hex_digits(self) -> String {
        format!("{:04X}", self.value())
    }
}

impl Display for CodePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

impl TryFrom<&str> for CodePoint {
    type Error = CodePointError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for CodePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CodePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label).map_err(serde::de::Error::custom)
    }
}
