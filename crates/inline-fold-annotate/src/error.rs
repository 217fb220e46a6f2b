//! Annotation command errors.

use thiserror::Error;

#[derive(Debug, Error)]
/// Why an annotation command produced no edits.
pub enum AnnotateError {
    #[error("prompt dismissed")]
    /// The user dismissed the quick-pick or the input box. Hosts abort silently.
    PromptCancelled,

    #[error("wrap requires a non-empty selection")]
    /// Wrap was invoked with an empty primary selection.
    EmptySelection,

    #[error("editor has no selection")]
    /// The editor reported no selection at all.
    NoSelection,

    #[error("invalid injector id catalog: {0}")]
    /// The id service payload is not `{"result": [...]}`.
    Catalog(#[from] serde_json::Error),
}

impl AnnotateError {
    /// Returns `true` when the command should end without any user-facing message.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::PromptCancelled | Self::NoSelection)
    }
}
