//! sheetmark configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::clipboard::CommandClipboard;
use crate::error::SheetError;
use crate::label::LabelScheme;
use crate::sheet::{Mode, SheetConfig};

/// Top-level sheetmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetmarkConfig {
    /// Default number of questions for new sheets.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Default label scheme.
    #[serde(default)]
    pub option_type: LabelScheme,
    /// Default options per question.
    #[serde(default = "default_option_count")]
    pub option_count: usize,
    /// Plain or keyed.
    #[serde(default)]
    pub mode: Mode,
    /// Program (plus arguments) that receives the copy payload on stdin.
    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: String,
    /// Clipboard write timeout in milliseconds.
    #[serde(default = "default_clipboard_timeout")]
    pub clipboard_timeout_ms: u64,
    /// How long the "Copied!" acknowledgment stays up, in milliseconds.
    #[serde(default = "default_copied_notice")]
    pub copied_notice_ms: u64,
}

fn default_question_count() -> usize {
    10
}
fn default_option_count() -> usize {
    4
}
fn default_clipboard_command() -> String {
    if cfg!(target_os = "macos") {
        "pbcopy"
    } else if cfg!(windows) {
        "clip"
    } else {
        "xclip -selection clipboard"
    }
    .to_string()
}
fn default_clipboard_timeout() -> u64 {
    2000
}
fn default_copied_notice() -> u64 {
    1500
}

impl Default for SheetmarkConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            option_type: LabelScheme::default(),
            option_count: default_option_count(),
            mode: Mode::default(),
            clipboard_command: default_clipboard_command(),
            clipboard_timeout_ms: default_clipboard_timeout(),
            copied_notice_ms: default_copied_notice(),
        }
    }
}

impl SheetmarkConfig {
    /// Sheet configuration from the defaults in this file.
    pub fn sheet_config(&self) -> Result<SheetConfig, SheetError> {
        SheetConfig::new(
            self.question_count,
            self.option_count,
            self.option_type,
            self.mode,
        )
    }

    /// Clipboard collaborator for the configured command.
    pub fn clipboard(&self) -> Result<CommandClipboard, SheetError> {
        CommandClipboard::from_command_line(
            &self.clipboard_command,
            Duration::from_millis(self.clipboard_timeout_ms),
        )
    }

    pub fn copied_notice(&self) -> Duration {
        Duration::from_millis(self.copied_notice_ms)
    }
}

/// Expand `${NAME}` references from the environment.
///
/// Expanded values are copied through verbatim and never rescanned. Unset
/// variables expand to nothing; an unterminated `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `sheetmark.toml` in the current directory
/// 2. `~/.config/sheetmark/config.toml`
///
/// `SHEETMARK_CLIPBOARD` overrides the clipboard command.
pub fn load_config_from(path: Option<&Path>) -> Result<SheetmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sheetmark.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
                &path,
            )?
        }
        None => SheetmarkConfig::default(),
    };

    if let Ok(command) = std::env::var("SHEETMARK_CLIPBOARD") {
        config.clipboard_command = command;
    }
    config.clipboard_command = resolve_env_vars(&config.clipboard_command);

    Ok(config)
}

/// Parse a config file's contents.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<SheetmarkConfig> {
    toml::from_str::<SheetmarkConfig>(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sheetmark"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::Clipboard;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_SHEETMARK_TEST_VAR", "wl-copy");
        assert_eq!(resolve_env_vars("${_SHEETMARK_TEST_VAR}"), "wl-copy");
        assert_eq!(
            resolve_env_vars("${_SHEETMARK_TEST_VAR} --type text/plain"),
            "wl-copy --type text/plain"
        );
        assert_eq!(resolve_env_vars("pbcopy ${unterminated"), "pbcopy ${unterminated");
        std::env::remove_var("_SHEETMARK_TEST_VAR");
    }

    #[test]
    fn expanded_values_are_not_rescanned() {
        std::env::set_var("_SHEETMARK_SELF_REF", "${_SHEETMARK_SELF_REF}");
        assert_eq!(
            resolve_env_vars("copy ${_SHEETMARK_SELF_REF} now"),
            "copy ${_SHEETMARK_SELF_REF} now"
        );
        std::env::remove_var("_SHEETMARK_SELF_REF");
        assert_eq!(resolve_env_vars("a${_SHEETMARK_UNSET_VAR}b"), "ab");
    }

    #[test]
    fn default_config() {
        let config = SheetmarkConfig::default();
        assert_eq!(config.question_count, 10);
        assert_eq!(config.option_count, 4);
        assert_eq!(config.mode, Mode::Keyed);
        assert_eq!(config.copied_notice(), Duration::from_millis(1500));
        assert!(!config.clipboard_command.is_empty());
        assert!(config.sheet_config().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            r#"
question_count = 25
option_type = "alpha"
mode = "plain"
clipboard_command = "wl-copy"
"#,
            Path::new("sheetmark.toml"),
        )
        .unwrap();
        assert_eq!(config.question_count, 25);
        assert_eq!(config.option_type, LabelScheme::Alphabetic);
        assert_eq!(config.option_count, 4);
        assert_eq!(config.mode, Mode::Plain);
        assert_eq!(config.clipboard().unwrap().name(), "wl-copy");
    }

    #[test]
    fn invalid_defaults_surface_on_use() {
        let config = parse_config_str("option_count = 1", Path::new("sheetmark.toml")).unwrap();
        assert!(config.sheet_config().unwrap_err().is_configuration());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/sheetmark.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "question_count = 3\noption_type = \"kana\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.question_count, 3);
        assert_eq!(config.option_type, LabelScheme::Syllabic);
    }
}
