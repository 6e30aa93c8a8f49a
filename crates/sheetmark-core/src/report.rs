//! Score report types and the text formatter.
//!
//! The text layout is a contract: the copy action hands it verbatim to the
//! clipboard, and external tooling compares it line by line.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sheet::Mode;

/// Shown in place of a label when nothing is selected.
pub const UNANSWERED: &str = "unanswered";

/// Outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Plain mode: the answer is recorded, not judged.
    Recorded,
    /// The user or the key has no selection.
    Unanswered,
    Correct,
    /// The user picked something other than `expected`.
    Incorrect { expected: String },
}

impl Verdict {
    /// Annotation appended to the display line, if any.
    pub fn annotation(&self) -> Option<String> {
        match self {
            Verdict::Correct => Some("(correct)".to_string()),
            Verdict::Incorrect { expected } => {
                Some(format!("(incorrect, correct answer: {expected})"))
            }
            Verdict::Recorded | Verdict::Unanswered => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Recorded => write!(f, "recorded"),
            Verdict::Unanswered => write!(f, "unanswered"),
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect { expected } => write!(f, "incorrect ({expected})"),
        }
    }
}

/// Per-question row of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub ordinal: usize,
    /// The user's selected label.
    pub answer: Option<String>,
    pub verdict: Verdict,
    pub display_line: String,
}

/// Derived scoring result for a whole sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub mode: Mode,
    pub question_count: usize,
    pub correct: usize,
    /// 0 to 100; always 0 in plain mode.
    pub percentage: u8,
    pub questions: Vec<QuestionResult>,
}

impl Default for ScoreReport {
    fn default() -> Self {
        Self {
            mode: Mode::Plain,
            question_count: 0,
            correct: 0,
            percentage: 0,
            questions: Vec::new(),
        }
    }
}

/// Format one report line: `Q{ordinal:>2}: {label} {annotation}`.
pub fn display_line(ordinal: usize, answer: Option<&str>, verdict: &Verdict) -> String {
    let label = answer.unwrap_or(UNANSWERED);
    match verdict.annotation() {
        Some(note) => format!("Q{ordinal:>2}: {label} {note}"),
        None => format!("Q{ordinal:>2}: {label}"),
    }
}

impl ScoreReport {
    /// One `\n`-terminated line per question.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for q in &self.questions {
            text.push_str(&q.display_line);
            text.push('\n');
        }
        text
    }

    /// The `Score: N / 100` header line used in keyed mode.
    pub fn score_line(&self) -> String {
        format!("Score: {} / 100", self.percentage)
    }

    /// Payload for the copy action: the report text, headed by the score in
    /// keyed mode.
    pub fn copy_text(&self) -> String {
        match self.mode {
            Mode::Keyed => format!("{}\n\n{}", self.score_line(), self.to_text()),
            Mode::Plain => self.to_text(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score, Answers};

    fn answers(pairs: &[(usize, &str)]) -> Answers {
        pairs.iter().map(|(o, l)| (*o, l.to_string())).collect()
    }

    #[test]
    fn ordinal_is_padded_to_two_columns() {
        assert_eq!(display_line(1, Some("A"), &Verdict::Recorded), "Q 1: A");
        assert_eq!(display_line(10, Some("B"), &Verdict::Correct), "Q10: B (correct)");
        assert_eq!(display_line(123, None, &Verdict::Unanswered), "Q123: unanswered");
    }

    #[test]
    fn keyed_copy_text_is_verbatim() {
        let user = answers(&[(1, "2"), (2, "1")]);
        let key = answers(&[(1, "2"), (2, "3"), (3, "4")]);
        let report = score(&user, Some(&key), 3);
        assert_eq!(
            report.copy_text(),
            "Score: 33 / 100\n\n\
             Q 1: 2 (correct)\n\
             Q 2: 1 (incorrect, correct answer: 3)\n\
             Q 3: unanswered\n"
        );
    }

    #[test]
    fn plain_copy_text_has_no_header() {
        let report = score(&answers(&[(1, "A")]), None, 2);
        assert_eq!(report.copy_text(), "Q 1: A\nQ 2: unanswered\n");
    }

    #[test]
    fn empty_report() {
        let report = ScoreReport::default();
        assert_eq!(report.to_text(), "");
        assert_eq!(report.copy_text(), "");
    }

    #[test]
    fn json_roundtrip() {
        let report = score(&answers(&[(1, "B")]), Some(&answers(&[(1, "C")])), 1);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.json");

        report.save_json(&path).unwrap();
        let loaded: ScoreReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
