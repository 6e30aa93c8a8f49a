//! Sheet data model.
//!
//! A [`Sheet`] is the structural description of a built answer sheet: one
//! tree of questions and labeled options per selection group. Selection
//! state lives separately in [`crate::selection::Selections`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::label::LabelScheme;
use crate::selection::Selections;

/// Largest question count a sheet may have.
pub const MAX_QUESTION_COUNT: usize = 10_000;

/// Largest option count a question may have.
pub const MAX_OPTION_COUNT: usize = 1_000;

/// Whether the sheet carries an answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A single group of answers, recorded without scoring.
    Plain,
    /// User answers plus an answer key, scored against each other.
    #[default]
    Keyed,
}

impl Mode {
    /// Selection groups present in this mode, in display order.
    pub fn groups(self) -> &'static [Group] {
        match self {
            Mode::Plain => &[Group::User],
            Mode::Keyed => &[Group::User, Group::Key],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Plain => write!(f, "plain"),
            Mode::Keyed => write!(f, "keyed"),
        }
    }
}

impl FromStr for Mode {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Mode::Plain),
            "keyed" | "key" => Ok(Mode::Keyed),
            other => Err(SheetError::config(format!("unknown mode: '{other}'"))),
        }
    }
}

/// Which role a set of selections belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    User,
    Key,
}

impl Group {
    /// Heading printed above this group's tree.
    pub fn title(self) -> &'static str {
        match self {
            Group::User => "Answers",
            Group::Key => "Answer key",
        }
    }

    /// Stable identifier used for form field names.
    pub fn field_prefix(self) -> &'static str {
        match self {
            Group::User => "user-answer",
            Group::Key => "correct-answer",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::User => write!(f, "user"),
            Group::Key => write!(f, "key"),
        }
    }
}

/// Validated sheet configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Number of questions, at least 1.
    pub question_count: usize,
    /// Options per question, at least 2.
    pub option_count: usize,
    /// How options are labeled.
    #[serde(default, alias = "option_type")]
    pub scheme: LabelScheme,
    /// Plain or keyed.
    #[serde(default)]
    pub mode: Mode,
}

impl SheetConfig {
    /// Create a configuration, rejecting out-of-range counts.
    pub fn new(
        question_count: usize,
        option_count: usize,
        scheme: LabelScheme,
        mode: Mode,
    ) -> Result<Self, SheetError> {
        let config = Self {
            question_count,
            option_count,
            scheme,
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from raw form input.
    ///
    /// Counts must be plain decimal integers; fractions, exponents and
    /// non-numeric text are rejected rather than truncated.
    pub fn parse(
        question_count: &str,
        option_type: &str,
        option_count: &str,
        mode: Mode,
    ) -> Result<Self, SheetError> {
        let question_count = parse_count("question count", question_count)?;
        let option_count = parse_count("option count", option_count)?;
        let scheme = option_type.parse()?;
        Self::new(question_count, option_count, scheme, mode)
    }

    /// Check the count ranges: `1..=MAX_QUESTION_COUNT` questions and
    /// `2..=MAX_OPTION_COUNT` options.
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.question_count < 1 {
            return Err(SheetError::config(format!(
                "question count must be at least 1, got {}",
                self.question_count
            )));
        }
        if self.question_count > MAX_QUESTION_COUNT {
            return Err(SheetError::config(format!(
                "question count must be at most {MAX_QUESTION_COUNT}, got {}",
                self.question_count
            )));
        }
        if self.option_count < 2 {
            return Err(SheetError::config(format!(
                "option count must be at least 2, got {}",
                self.option_count
            )));
        }
        if self.option_count > MAX_OPTION_COUNT {
            return Err(SheetError::config(format!(
                "option count must be at most {MAX_OPTION_COUNT}, got {}",
                self.option_count
            )));
        }
        Ok(())
    }
}

fn parse_count(what: &str, raw: &str) -> Result<usize, SheetError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| SheetError::config(format!("{what} must be a whole number, got '{trimmed}'")))?;
    usize::try_from(value)
        .map_err(|_| SheetError::config(format!("{what} must not be negative, got {value}")))
}

/// One selectable choice within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSlot {
    /// 0-based position within the question.
    pub index: usize,
    /// Scheme-derived display text.
    pub label: String,
}

/// A question and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based ordinal.
    pub ordinal: usize,
    pub options: Vec<OptionSlot>,
}

/// The questions of one selection group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTree {
    pub group: Group,
    pub questions: Vec<Question>,
}

impl SheetTree {
    /// Look up a question by 1-based ordinal.
    pub fn question(&self, ordinal: usize) -> Option<&Question> {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
    }
}

/// A built answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub config: SheetConfig,
    /// One tree per group in [`Mode::groups`] order.
    pub trees: Vec<SheetTree>,
}

impl Sheet {
    pub fn question_count(&self) -> usize {
        self.config.question_count
    }

    pub fn option_count(&self) -> usize {
        self.config.option_count
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// The tree for `group`, if the sheet's mode has one.
    pub fn tree(&self, group: Group) -> Option<&SheetTree> {
        self.trees.iter().find(|t| t.group == group)
    }

    /// Label of option `index` in question `ordinal`.
    pub fn label(&self, group: Group, ordinal: usize, index: usize) -> Option<&str> {
        self.tree(group)?
            .question(ordinal)?
            .options
            .get(index)
            .map(|o| o.label.as_str())
    }

    /// Index of the first option in question `ordinal` whose label is `label`.
    pub fn option_index(&self, group: Group, ordinal: usize, label: &str) -> Option<usize> {
        self.tree(group)?
            .question(ordinal)?
            .options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.index)
    }

    /// Render the sheet as fillable plain text, marking current selections.
    pub fn render_text(&self, selections: &Selections) -> String {
        let mut out = String::new();
        for (n, tree) in self.trees.iter().enumerate() {
            if n > 0 {
                out.push('\n');
            }
            out.push_str(tree.group.title());
            out.push('\n');
            for question in &tree.questions {
                let chosen = selections.selected(tree.group, question.ordinal);
                let marks: Vec<String> = question
                    .options
                    .iter()
                    .map(|o| {
                        let mark = if chosen == Some(o.index) { 'x' } else { ' ' };
                        format!("({mark}) {}", o.label)
                    })
                    .collect();
                out.push_str(&format!("Q{:>2}: {}\n", question.ordinal, marks.join("  ")));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_counts_above_limits() {
        let err = SheetConfig::parse("1", "number", "9223372036854775807", Mode::Plain).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("option count must be at most 1000"));

        let err = SheetConfig::parse("10001", "number", "4", Mode::Keyed).unwrap_err();
        assert!(err.to_string().contains("question count must be at most 10000"));

        let at_limit = SheetConfig::new(MAX_QUESTION_COUNT, MAX_OPTION_COUNT, LabelScheme::Numeric, Mode::Plain);
        assert!(at_limit.is_ok());
    }

    #[test]
    fn parse_valid_config() {
        let config = SheetConfig::parse(" 20 ", "alpha", "5", Mode::Keyed).unwrap();
        assert_eq!(config.question_count, 20);
        assert_eq!(config.option_count, 5);
        assert_eq!(config.scheme, LabelScheme::Alphabetic);
    }

    #[test]
    fn parse_rejects_bad_counts() {
        for (q, o) in [
            ("0", "4"),
            ("3", "1"),
            ("-2", "4"),
            ("abc", "4"),
            ("3", ""),
            ("2.5", "4"),
            ("NaN", "4"),
            ("inf", "4"),
        ] {
            let err = SheetConfig::parse(q, "number", o, Mode::Plain).unwrap_err();
            assert!(err.is_configuration(), "{q}/{o} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_unknown_option_type() {
        let err = SheetConfig::parse("3", "roman", "4", Mode::Plain).unwrap_err();
        assert!(err.to_string().contains("roman"));
    }

    #[test]
    fn mode_groups() {
        assert_eq!(Mode::Plain.groups(), &[Group::User]);
        assert_eq!(Mode::Keyed.groups(), &[Group::User, Group::Key]);
        assert_eq!("PLAIN".parse::<Mode>().unwrap(), Mode::Plain);
        assert!("both".parse::<Mode>().is_err());
    }

    #[test]
    fn config_deserializes_option_type_alias() {
        let config: SheetConfig = toml::from_str(
            r#"
question_count = 3
option_count = 4
option_type = "kana"
mode = "plain"
"#,
        )
        .unwrap();
        assert_eq!(config.scheme, LabelScheme::Syllabic);
        assert_eq!(config.mode, Mode::Plain);
    }
}
