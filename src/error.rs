//! Error types for speech synthesis.

use thiserror::Error;

use crate::segmenter::SegmentError;

/// Errors returned by the synthesis client.
///
/// Every variant is terminal for the call that produced it: nothing is retried,
/// and a multi-chunk synthesis stops at the first error.
#[derive(Debug, Error)]
pub enum TtsError {
    /// A required option is empty or out of range. Raised before any network I/O.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("text length ({length}) should be at most {limit} characters. Try the long-text synthesis for longer text.")]
    TextTooLong { length: usize, limit: usize },

    #[error(transparent)]
    Segmentation(#[from] SegmentError),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("lang \"{0}\" might not exist")]
    UnsupportedLanguage(String),

    #[error("parse response failed: {0}")]
    Parse(String),
}

impl TtsError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        TtsError::Validation(msg.into())
    }
}
