//! Clipboard collaborator and the copy action.
//!
//! The copy action hands report text to a [`Clipboard`] and, on success,
//! flips a [`StatusLabel`] to `Copied!` for a short while.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::SheetError;

/// Acknowledgment shown after a successful copy.
pub const COPIED_NOTICE: &str = "Copied!";

/// How long [`COPIED_NOTICE`] stays up by default.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(1500);

/// Something that can take text for the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Human-readable name (e.g. the command line).
    fn name(&self) -> &str;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), SheetError>;
}

#[async_trait]
impl<C: Clipboard + ?Sized> Clipboard for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn write_text(&self, text: &str) -> Result<(), SheetError> {
        (**self).write_text(text).await
    }
}

/// Clipboard backed by an external program that reads stdin
/// (`pbcopy`, `xclip -selection clipboard`, `wl-copy`, ...).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    command_line: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    /// Parse a whitespace-separated command line.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self, SheetError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| SheetError::clipboard("no clipboard command configured"))?;
        Ok(Self {
            command_line: command_line.trim().to_string(),
            program,
            args: parts.collect(),
            timeout,
        })
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.command_line
    }

    async fn write_text(&self, text: &str) -> Result<(), SheetError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SheetError::clipboard(format!("failed to start '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SheetError::clipboard("clipboard command has no stdin"))?;
        let payload = text.as_bytes().to_vec();

        let io = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
            drop(stdin);
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.timeout, io)
            .await
            .map_err(|_| {
                SheetError::clipboard(format!(
                    "'{}' did not finish within {}ms",
                    self.command_line,
                    self.timeout.as_millis()
                ))
            })?
            .map_err(|e| SheetError::clipboard(format!("'{}' failed: {e}", self.command_line)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SheetError::clipboard(format!(
                "'{}' exited with {}: {}",
                self.command_line,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// In-process clipboard, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write.
    pub fn rejecting() -> Self {
        Self {
            contents: Mutex::new(None),
            reject: true,
        }
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<(), SheetError> {
        if self.reject {
            return Err(SheetError::clipboard("write rejected"));
        }
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

/// A button-style label that briefly shows an acknowledgment.
#[derive(Debug, Clone)]
pub struct StatusLabel {
    resting: String,
    notice_duration: Duration,
    acknowledged_until: Option<Instant>,
}

impl StatusLabel {
    pub fn new(resting: impl Into<String>, notice_duration: Duration) -> Self {
        Self {
            resting: resting.into(),
            notice_duration,
            acknowledged_until: None,
        }
    }

    /// Show [`COPIED_NOTICE`] from `now` for the notice duration.
    pub fn acknowledge(&mut self, now: Instant) {
        self.acknowledged_until = Some(now + self.notice_duration);
    }

    /// Label text as of `now`.
    pub fn text_at(&self, now: Instant) -> &str {
        match self.acknowledged_until {
            Some(until) if now < until => COPIED_NOTICE,
            _ => &self.resting,
        }
    }
}

/// Write `text` to `clipboard` and acknowledge on `status`.
///
/// On failure the label is left as it was and the error is returned for the
/// caller to surface as a notice.
pub async fn copy_to_clipboard(
    clipboard: &dyn Clipboard,
    text: &str,
    status: &mut StatusLabel,
) -> Result<(), SheetError> {
    match clipboard.write_text(text).await {
        Ok(()) => {
            tracing::info!(clipboard = clipboard.name(), bytes = text.len(), "copied report");
            status.acknowledge(Instant::now());
            Ok(())
        }
        Err(e) => {
            tracing::warn!(clipboard = clipboard.name(), "copy failed: {e}");
            Err(e)
        }
    }
}
