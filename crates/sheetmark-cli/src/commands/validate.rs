//! The `sheetmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sheetmark_core::answers::{parse_answer_file, validate_answer_file};

pub fn execute(answers_path: PathBuf) -> Result<()> {
    let file = parse_answer_file(&answers_path)?;
    let config = &file.config;

    println!(
        "Answer file: {} questions x {} options ({}, {}), {} answers, {} key entries",
        config.question_count,
        config.option_count,
        config.scheme,
        config.mode,
        file.answers.len(),
        file.key.len()
    );

    let warnings = validate_answer_file(&file);
    for w in &warnings {
        let prefix = w
            .ordinal
            .map(|o| format!("  [Q{o}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Answer file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
