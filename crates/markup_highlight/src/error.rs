use thiserror::Error;

/// Errors surfaced by nested language highlighting.
///
/// The markup tokenizer itself never fails: malformed input degrades to
/// best-effort partial tokens and a truncated source is reported through the
/// consumer protocol. Only the pluggable nested highlighter has failure
/// modes worth reporting.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The nested highlighter does not support the language of a staged code
    /// body.
    #[error("unsupported nested language: {0}")]
    UnsupportedLanguage(String),
    /// The nested highlighter failed for a reason of its own.
    #[error("nested highlighting failed: {0}")]
    NestedHighlight(String),
}
