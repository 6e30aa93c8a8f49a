//! Interactive session state.
//!
//! A [`Session`] owns the live sheet and its selections. Every event (a
//! configuration submit or a selection change) is applied synchronously and
//! followed by a full rescore, so [`Session::report`] always reflects the
//! current selections.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::builder::build;
use crate::error::SheetError;
use crate::report::ScoreReport;
use crate::scoring::score;
use crate::selection::Selections;
use crate::sheet::{Group, Sheet, SheetConfig};

/// User and key labels for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerPair {
    pub user: Option<String>,
    pub key: Option<String>,
}

/// The live sheet, its selections, and the latest report.
#[derive(Debug, Default)]
pub struct Session {
    sheet: Option<Sheet>,
    selections: Selections,
    report: ScoreReport,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new sheet from `config`, discarding the old sheet and every
    /// selection made on it.
    ///
    /// A rejected configuration leaves the session exactly as it was.
    pub fn submit(&mut self, config: SheetConfig) -> Result<&ScoreReport, SheetError> {
        let sheet = build(config)?;
        self.selections = Selections::for_sheet(&sheet);
        self.sheet = Some(sheet);
        self.rescore();
        Ok(&self.report)
    }

    /// Select option `index` of question `ordinal` in `group`.
    ///
    /// Returns `false` when the event does not match the live sheet; such
    /// events are logged and ignored.
    pub fn select(&mut self, group: Group, ordinal: usize, index: usize) -> bool {
        if !self.selections.select(group, ordinal, index) {
            tracing::warn!(%group, ordinal, index, "ignoring selection outside the sheet");
            return false;
        }
        self.rescore();
        true
    }

    /// Select the option labeled `label` of question `ordinal` in `group`.
    pub fn select_label(&mut self, group: Group, ordinal: usize, label: &str) -> bool {
        let index = self
            .sheet
            .as_ref()
            .and_then(|s| s.option_index(group, ordinal, label));
        match index {
            Some(index) => self.select(group, ordinal, index),
            None => {
                tracing::warn!(%group, ordinal, label, "ignoring selection of unknown label");
                false
            }
        }
    }

    /// Deselect question `ordinal` in `group`.
    pub fn clear(&mut self, group: Group, ordinal: usize) -> bool {
        if !self.selections.clear(group, ordinal) {
            tracing::warn!(%group, ordinal, "ignoring clear outside the sheet");
            return false;
        }
        self.rescore();
        true
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn report(&self) -> &ScoreReport {
        &self.report
    }

    /// Copy payload for the current report.
    pub fn copy_text(&self) -> String {
        self.report.copy_text()
    }

    /// Current user/key labels per ordinal.
    pub fn answer_state(&self) -> BTreeMap<usize, AnswerPair> {
        let Some(sheet) = &self.sheet else {
            return BTreeMap::new();
        };
        let user = self.selections.answers(Group::User, sheet).unwrap_or_default();
        let key = self.selections.answers(Group::Key, sheet).unwrap_or_default();
        (1..=sheet.question_count())
            .map(|ordinal| {
                (
                    ordinal,
                    AnswerPair {
                        user: user.get(&ordinal).cloned(),
                        key: key.get(&ordinal).cloned(),
                    },
                )
            })
            .collect()
    }

    /// Render the live sheet as text, or an empty string before the first
    /// submit.
    pub fn render_sheet(&self) -> String {
        self.sheet
            .as_ref()
            .map(|s| s.render_text(&self.selections))
            .unwrap_or_default()
    }

    fn rescore(&mut self) {
        self.report = match &self.sheet {
            Some(sheet) => {
                let user = self.selections.answers(Group::User, sheet).unwrap_or_default();
                let key = self.selections.answers(Group::Key, sheet);
                score(&user, key.as_ref(), sheet.question_count())
            }
            None => ScoreReport::default(),
        };
    }
}
