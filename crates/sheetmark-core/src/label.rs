//! Option label schemes.
//!
//! A scheme maps a 0-based option index to the text printed next to the
//! option. The mapping is pure, so the same configuration always yields the
//! same labels, and the user sheet and the answer key agree on every label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Placeholder for indices a scheme has no symbol for.
pub const UNKNOWN_LABEL: &str = "?";

/// Katakana used by the syllabic scheme.
const SYLLABARY: [&str; 10] = ["ア", "イ", "ウ", "エ", "オ", "カ", "キ", "ク", "ケ", "コ"];

/// How options are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelScheme {
    /// `1, 2, 3, ...`
    #[default]
    #[serde(alias = "number")]
    Numeric,
    /// `A, B, C, ...`
    #[serde(alias = "alpha")]
    Alphabetic,
    /// `ア, イ, ウ, ...` (ten symbols)
    #[serde(alias = "kana")]
    Syllabic,
}

impl LabelScheme {
    /// Display text for the option at `index`.
    ///
    /// Alphabetic labels past `Z` keep counting code points (`[`, `\`, ...)
    /// rather than rolling over to `AA`. Syllabic labels past the tenth
    /// symbol are [`UNKNOWN_LABEL`].
    pub fn label_for(self, index: usize) -> String {
        match self {
            LabelScheme::Numeric => (index + 1).to_string(),
            LabelScheme::Alphabetic => u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_add(u32::from(b'A')))
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            LabelScheme::Syllabic => SYLLABARY
                .get(index)
                .copied()
                .unwrap_or(UNKNOWN_LABEL)
                .to_string(),
        }
    }

    /// Number of options this scheme labels distinctly with letters or
    /// symbols, or `None` when every index gets its own label.
    pub fn distinct_limit(self) -> Option<usize> {
        match self {
            LabelScheme::Numeric => None,
            LabelScheme::Alphabetic => Some(26),
            LabelScheme::Syllabic => Some(SYLLABARY.len()),
        }
    }
}

impl fmt::Display for LabelScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelScheme::Numeric => write!(f, "number"),
            LabelScheme::Alphabetic => write!(f, "alpha"),
            LabelScheme::Syllabic => write!(f, "kana"),
        }
    }
}

impl FromStr for LabelScheme {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "number" | "numeric" => Ok(LabelScheme::Numeric),
            "alpha" | "alphabetic" => Ok(LabelScheme::Alphabetic),
            "kana" | "syllabic" => Ok(LabelScheme::Syllabic),
            other => Err(SheetError::config(format!("unknown option type: '{other}'"))),
        }
    }
}
