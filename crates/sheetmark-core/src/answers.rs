//! TOML answer files.
//!
//! An answer file records one filled-in sheet: its configuration, the
//! user's answers, and optionally the answer key. Loading checks that every
//! entry names a real question and a real option label.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builder::build;
use crate::error::SheetError;
use crate::label::LabelScheme;
use crate::scoring::Answers;
use crate::session::Session;
use crate::sheet::{Group, Mode, Sheet, SheetConfig};

/// Intermediate TOML structure for parsing answer files.
#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    sheet: TomlSheetHeader,
    #[serde(default)]
    answers: BTreeMap<String, TomlLabel>,
    #[serde(default)]
    key: Option<BTreeMap<String, TomlLabel>>,
}

#[derive(Debug, Deserialize)]
struct TomlSheetHeader {
    question_count: usize,
    #[serde(default = "default_option_type")]
    option_type: String,
    option_count: usize,
    #[serde(default)]
    mode: Option<String>,
}

fn default_option_type() -> String {
    "number".to_string()
}

/// Numeric labels may be written bare (`1 = 2`) or quoted (`1 = "2"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlLabel {
    Text(String),
    Number(i64),
}

impl TomlLabel {
    fn into_string(self) -> String {
        match self {
            TomlLabel::Text(s) => s,
            TomlLabel::Number(n) => n.to_string(),
        }
    }
}

/// A parsed and checked answer file.
#[derive(Debug, Clone)]
pub struct AnswerFile {
    pub config: SheetConfig,
    /// User answers by ordinal.
    pub answers: Answers,
    /// Key answers by ordinal; empty when the file has no `[key]` table.
    pub key: Answers,
}

impl AnswerFile {
    /// Replay the file into a fresh session.
    pub fn to_session(&self) -> Result<Session, SheetError> {
        let mut session = Session::new();
        session.submit(self.config)?;
        for (&ordinal, label) in &self.answers {
            session.select_label(Group::User, ordinal, label);
        }
        if self.config.mode == Mode::Keyed {
            for (&ordinal, label) in &self.key {
                session.select_label(Group::Key, ordinal, label);
            }
        }
        Ok(session)
    }
}

/// Parse an answer file from disk.
pub fn parse_answer_file(path: &Path) -> Result<AnswerFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file: {}", path.display()))?;

    parse_answer_file_str(&content, path)
}

/// Parse answer file contents (useful for testing).
pub fn parse_answer_file_str(content: &str, source_path: &Path) -> Result<AnswerFile> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let scheme: LabelScheme = parsed.sheet.option_type.parse()?;
    let mode = match &parsed.sheet.mode {
        Some(m) => m.parse::<Mode>()?,
        None if parsed.key.is_some() => Mode::Keyed,
        None => Mode::Plain,
    };
    let config = SheetConfig::new(
        parsed.sheet.question_count,
        parsed.sheet.option_count,
        scheme,
        mode,
    )
    .with_context(|| format!("invalid [sheet] in {}", source_path.display()))?;

    let sheet = build(config)?;
    let answers = resolve_entries(&sheet, "answers", parsed.answers)?;
    let key = resolve_entries(&sheet, "key", parsed.key.unwrap_or_default())?;

    Ok(AnswerFile {
        config,
        answers,
        key,
    })
}

fn resolve_entries(
    sheet: &Sheet,
    table: &str,
    entries: BTreeMap<String, TomlLabel>,
) -> Result<Answers> {
    let mut resolved = Answers::new();
    for (raw_ordinal, label) in entries {
        let ordinal: usize = raw_ordinal.trim().parse().with_context(|| {
            format!("[{table}] key '{raw_ordinal}' is not a question number")
        })?;
        anyhow::ensure!(
            (1..=sheet.question_count()).contains(&ordinal),
            "[{table}] question {ordinal} is outside 1..={}",
            sheet.question_count()
        );
        let label = label.into_string();
        // Both trees carry the same labels, so the user tree is enough.
        if sheet.option_index(Group::User, ordinal, &label).is_none() {
            let options: Vec<&str> = sheet
                .tree(Group::User)
                .and_then(|t| t.question(ordinal))
                .map(|q| q.options.iter().map(|o| o.label.as_str()).collect())
                .unwrap_or_default();
            anyhow::bail!(
                "[{table}] question {ordinal}: '{label}' is not one of {}",
                options.join(", ")
            );
        }
        // `1`, `01` and `+1` are distinct TOML keys for the same question
        if resolved.insert(ordinal, label).is_some() {
            anyhow::bail!("[{table}] question {ordinal} is listed more than once");
        }
    }
    Ok(resolved)
}

/// A non-fatal issue found in an answer file.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question, if the warning is about one.
    pub ordinal: Option<usize>,
    pub message: String,
}

/// Check an answer file for issues that do not stop it from being scored.
pub fn validate_answer_file(file: &AnswerFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let config = &file.config;

    if let Some(limit) = config.scheme.distinct_limit() {
        if config.option_count > limit {
            let message = match config.scheme {
                LabelScheme::Syllabic => format!(
                    "options {}..={} have no syllabic symbol and are all labeled '?'",
                    limit + 1,
                    config.option_count
                ),
                _ => format!(
                    "options {}..={} are past 'Z' and are labeled with punctuation",
                    limit + 1,
                    config.option_count
                ),
            };
            warnings.push(ValidationWarning {
                ordinal: None,
                message,
            });
        }
    }

    match config.mode {
        Mode::Plain if !file.key.is_empty() => warnings.push(ValidationWarning {
            ordinal: None,
            message: "mode is plain; [key] entries are ignored".into(),
        }),
        Mode::Keyed => {
            for ordinal in 1..=config.question_count {
                if !file.key.contains_key(&ordinal) {
                    warnings.push(ValidationWarning {
                        ordinal: Some(ordinal),
                        message: "no key answer; counted as wrong".into(),
                    });
                }
            }
        }
        Mode::Plain => {}
    }

    warnings
}
