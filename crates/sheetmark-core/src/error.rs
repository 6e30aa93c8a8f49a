//! Engine error types.
//!
//! Only two failure classes exist: a configuration that cannot be built, and
//! a clipboard collaborator that cannot take the copy payload. Both are
//! terminal for the triggering action only; the session keeps going.

use thiserror::Error;

/// Errors surfaced by the sheet builder and the copy action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Question/option counts are non-numeric, out of range, or the option
    /// type is not a known label scheme.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The clipboard collaborator is missing or rejected the write.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

impl SheetError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SheetError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn clipboard(msg: impl Into<String>) -> Self {
        SheetError::ClipboardUnavailable(msg.into())
    }

    /// Returns `true` if the error came from a rejected configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SheetError::InvalidConfiguration(_))
    }

    /// Returns `true` if the error came from the clipboard collaborator.
    pub fn is_clipboard(&self) -> bool {
        matches!(self, SheetError::ClipboardUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_class() {
        let err = SheetError::config("question count must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: question count must be at least 1"
        );
        assert!(err.is_configuration());
        assert!(!err.is_clipboard());

        let err = SheetError::clipboard("no clipboard command configured");
        assert!(err.to_string().starts_with("clipboard unavailable"));
        assert!(err.is_clipboard());
    }
}
