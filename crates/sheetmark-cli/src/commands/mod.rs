pub mod generate;
pub mod init;
pub mod interactive;
pub mod score;
pub mod validate;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use sheetmark_core::clipboard::CommandClipboard;
use sheetmark_core::config::SheetmarkConfig;
use sheetmark_core::SheetError;
use sheetmark_report::html::write_html;

/// Print `content` to stdout, or write it to `output` and report the path.
fn emit(content: &str, output: Option<&Path>, what: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {what} to {}", path.display()))?;
            eprintln!("{what}: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Like [`emit`], but files go through the HTML writer.
fn emit_html(html: &str, output: Option<&Path>, what: &str) -> Result<()> {
    match output {
        Some(path) => {
            write_html(html, path)?;
            eprintln!("{what}: {}", path.display());
            Ok(())
        }
        None => emit(html, None, what),
    }
}

/// Clipboard from an explicit command line, falling back to the config.
fn clipboard_for(
    config: &SheetmarkConfig,
    command_override: Option<&str>,
) -> Result<CommandClipboard, SheetError> {
    match command_override {
        Some(command) => CommandClipboard::from_command_line(
            command,
            Duration::from_millis(config.clipboard_timeout_ms),
        ),
        None => config.clipboard(),
    }
}
