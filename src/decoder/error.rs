//! Failures that indicate a defect in the decoder itself.
//!
//! Malformed sentences and unknown devices are not errors: `decode` reports
//! them as `Ok(None)`. Everything here means the compiled patterns and the
//! code reading them disagree, and should be surfaced loudly.

use super::pattern::{FieldSlot, PatternError};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid sentence pattern: {0}")]
    Pattern(String),

    #[error("field cursor exhausted after {consumed} fields")]
    CursorExhausted { consumed: usize },

    #[error("{remaining} of {declared} matched fields were never read")]
    UnconsumedFields { declared: usize, remaining: usize },

    #[error("field {index} ({slot}) holds '{value}' which cannot be read as {expected}")]
    FieldType {
        index: usize,
        slot: FieldSlot,
        value: String,
        expected: &'static str,
    },
}

impl From<&PatternError> for DecodeError {
    fn from(error: &PatternError) -> Self {
        DecodeError::Pattern(error.to_string())
    }
}
