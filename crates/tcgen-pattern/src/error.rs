use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors raised while validating ID text or building an image.
///
/// Rendering itself never fails: over-long text is truncated and characters without a glyph are
/// skipped. The text variants are produced by [`crate::validate_text`], which callers run on user
/// input before rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("text is {len} characters long (maximum {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("invalid character {ch:?} at position {position} (allowed: A-Z, 0-9, space, '-' and ':')")]
    UnsupportedChar { ch: char, position: usize },

    #[error("failed to allocate {bytes} byte EPROM buffer")]
    Allocation { bytes: usize },
}
