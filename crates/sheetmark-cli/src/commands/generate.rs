//! The `sheetmark generate` command.

use std::path::PathBuf;

use anyhow::Result;

use sheetmark_core::builder::build;
use sheetmark_core::config::load_config_from;
use sheetmark_core::selection::Selections;
use sheetmark_core::sheet::{Mode, SheetConfig};
use sheetmark_report::html::generate_sheet_html;

pub fn execute(
    questions: Option<String>,
    option_type: Option<String>,
    options: Option<String>,
    mode: Option<String>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Flags override the config defaults
    let mode = match mode {
        Some(m) => m.parse::<Mode>()?,
        None => config.mode,
    };
    let sheet_config = SheetConfig::parse(
        &questions.unwrap_or_else(|| config.question_count.to_string()),
        &option_type.unwrap_or_else(|| config.option_type.to_string()),
        &options.unwrap_or_else(|| config.option_count.to_string()),
        mode,
    )?;

    let sheet = build(sheet_config)?;
    let selections = Selections::for_sheet(&sheet);

    match format.as_str() {
        "text" => super::emit(&sheet.render_text(&selections), output.as_deref(), "Answer sheet"),
        "html" => super::emit_html(
            &generate_sheet_html(&sheet, &selections, chrono::Utc::now()),
            output.as_deref(),
            "HTML answer sheet",
        ),
        other => anyhow::bail!("unknown format: '{other}' (expected text or html)"),
    }
}
