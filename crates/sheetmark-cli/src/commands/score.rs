//! The `sheetmark score` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use sheetmark_core::answers::{parse_answer_file, validate_answer_file};
use sheetmark_core::clipboard::{copy_to_clipboard, StatusLabel};
use sheetmark_core::config::load_config_from;
use sheetmark_core::report::ScoreReport;
use sheetmark_core::sheet::Mode;
use sheetmark_report::html::generate_report_html;

pub async fn execute(
    answers_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    copy: bool,
    clipboard_command: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let file = parse_answer_file(&answers_path)?;
    for w in validate_answer_file(&file) {
        match w.ordinal {
            Some(ordinal) => tracing::debug!(ordinal, "{}", w.message),
            None => tracing::debug!("{}", w.message),
        }
    }

    let session = file.to_session()?;
    let report = session.report();
    tracing::info!(
        questions = report.question_count,
        correct = report.correct,
        mode = %report.mode,
        "scored {}",
        answers_path.display()
    );

    match format.as_str() {
        "text" => super::emit(&report.copy_text(), output.as_deref(), "Report")?,
        "json" => match &output {
            Some(path) => {
                report.save_json(path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(report)?),
        },
        "table" => super::emit(&summary_table(report), output.as_deref(), "Table")?,
        "html" => super::emit_html(
            &generate_report_html(report, chrono::Utc::now()),
            output.as_deref(),
            "HTML report",
        )?,
        other => anyhow::bail!("unknown format: '{other}' (expected text, json, table or html)"),
    }

    if copy {
        let config = load_config_from(config_path.as_deref())?;
        let clipboard = super::clipboard_for(&config, clipboard_command.as_deref())?;
        let mut status = StatusLabel::new("Copy", config.copied_notice());
        copy_to_clipboard(&clipboard, &session.copy_text(), &mut status).await?;
        eprintln!("{}", status.text_at(Instant::now()));
    }

    Ok(())
}

fn summary_table(report: &ScoreReport) -> String {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Verdict"]);

    for q in &report.questions {
        table.add_row(vec![
            Cell::new(q.ordinal),
            Cell::new(q.answer.as_deref().unwrap_or("-")),
            Cell::new(&q.verdict),
        ]);
    }

    let mut out = String::new();
    if report.mode == Mode::Keyed {
        out.push_str(&format!(
            "{} ({} of {} correct)\n",
            report.score_line(),
            report.correct,
            report.question_count
        ));
    }
    out.push_str(&format!("{table}\n"));
    out
}
