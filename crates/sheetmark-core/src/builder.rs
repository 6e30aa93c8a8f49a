//! Sheet builder.
//!
//! Turns a configuration into the question/option trees for every
//! selection group the mode needs. Both trees are produced from the same
//! label list so their labels agree position for position.

use crate::error::SheetError;
use crate::sheet::{Group, OptionSlot, Question, Sheet, SheetConfig, SheetTree};

/// Build a sheet, rejecting configurations with fewer than one question or
/// fewer than two options.
pub fn build(config: SheetConfig) -> Result<Sheet, SheetError> {
    config.validate()?;

    let labels: Vec<String> = (0..config.option_count)
        .map(|i| config.scheme.label_for(i))
        .collect();

    let trees = config
        .mode
        .groups()
        .iter()
        .map(|&group| build_tree(group, config.question_count, &labels))
        .collect();

    tracing::debug!(
        questions = config.question_count,
        options = config.option_count,
        scheme = %config.scheme,
        mode = %config.mode,
        "built answer sheet"
    );

    Ok(Sheet { config, trees })
}

fn build_tree(group: Group, question_count: usize, labels: &[String]) -> SheetTree {
    let questions = (1..=question_count)
        .map(|ordinal| Question {
            ordinal,
            options: labels
                .iter()
                .enumerate()
                .map(|(index, label)| OptionSlot {
                    index,
                    label: label.clone(),
                })
                .collect(),
        })
        .collect();

    SheetTree { group, questions }
}
