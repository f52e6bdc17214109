//! Pipeline error types

use thiserror::Error;

use crate::llm::LlmError;

/// Fatal errors that end a story run
///
/// Recoverable conditions (unknown category, malformed judge output, loop
/// caps) never show up here.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Story request is empty")]
    BlankRequest,

    #[error("The {stage} returned an empty story")]
    EmptyDraft { stage: &'static str },

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Model gateway failed: {0}")]
    Llm(#[from] LlmError),
}
