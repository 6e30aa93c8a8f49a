//! HTML generator.
//!
//! Produces self-contained HTML files with all CSS inlined: a fillable,
//! printable answer sheet, and a score report.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use sheetmark_core::report::{ScoreReport, Verdict};
use sheetmark_core::selection::Selections;
use sheetmark_core::sheet::{Mode, Sheet, SheetTree};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn push_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

/// Generate a fillable answer sheet.
///
/// Each question of each group becomes one radio group named
/// `<group>-<ordinal>`, so a browser enforces one choice per question.
/// Options already selected in `selections` are pre-checked.
pub fn generate_sheet_html(
    sheet: &Sheet,
    selections: &Selections,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();
    push_head(&mut html, "sheetmark answer sheet");

    html.push_str("<header>\n");
    html.push_str("<h1>Answer sheet</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} options ({}) | {} | {}</p>\n",
        sheet.question_count(),
        sheet.option_count(),
        sheet.config.scheme,
        sheet.mode(),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<form>\n");
    for tree in &sheet.trees {
        push_tree(&mut html, tree, selections);
    }
    html.push_str("</form>\n");

    html.push_str("</body>\n</html>");
    html
}

fn push_tree(html: &mut String, tree: &SheetTree, selections: &Selections) {
    let prefix = tree.group.field_prefix();
    html.push_str(&format!("<section class=\"group {prefix}\">\n"));
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(tree.group.title())));

    for question in &tree.questions {
        let chosen = selections.selected(tree.group, question.ordinal);
        html.push_str("<fieldset class=\"question\">\n");
        html.push_str(&format!("<legend>Q{:>2}</legend>\n", question.ordinal));
        for option in &question.options {
            let id = format!("{prefix}-q{}-o{}", question.ordinal, option.index);
            let checked = if chosen == Some(option.index) {
                " checked"
            } else {
                ""
            };
            html.push_str(&format!(
                "<label for=\"{id}\"><input type=\"radio\" id=\"{id}\" name=\"{prefix}-{}\" value=\"{}\"{checked}>{}</label>\n",
                question.ordinal,
                html_escape(&option.label),
                html_escape(&option.label),
            ));
        }
        html.push_str("</fieldset>\n");
    }

    html.push_str("</section>\n");
}

/// Generate a score report page.
pub fn generate_report_html(report: &ScoreReport, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();
    push_head(&mut html, "sheetmark score report");

    html.push_str("<header>\n");
    html.push_str("<h1>Score report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} | {}</p>\n",
        report.question_count,
        report.mode,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if report.mode == Mode::Keyed {
        html.push_str(&format!(
            "<p class=\"score\">{} <span class=\"meta\">({} of {} correct)</span></p>\n",
            html_escape(&report.score_line()),
            report.correct,
            report.question_count
        ));
    }
    html.push_str("</header>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Question</th><th>Answer</th><th>Verdict</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for q in &report.questions {
        let class = match q.verdict {
            Verdict::Correct => "pass",
            Verdict::Incorrect { .. } => "fail",
            Verdict::Unanswered | Verdict::Recorded => "",
        };
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            q.ordinal,
            html_escape(q.answer.as_deref().unwrap_or("-")),
            html_escape(&q.verdict.to_string()),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"copy-text\">\n");
    html.push_str("<h2>Text</h2>\n<pre><code>");
    html.push_str(&html_escape(&report.copy_text()));
    html.push_str("</code></pre>\n</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write a generated HTML document to a file.
pub fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 1.5rem; font-weight: bold; }
fieldset.question { display: flex; flex-wrap: wrap; gap: 1rem; border: 1px solid var(--border); border-radius: 8px; margin: 0.5rem 0; }
fieldset.question label { white-space: nowrap; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
@media print {
  :root { --bg: #fff; --fg: #000; }
  body { padding: 0; }
  .correct-answer { break-before: page; }
  .raw-data { display: none; }
}
"#;
