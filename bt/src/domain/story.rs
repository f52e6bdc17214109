//! Request, draft and feedback values

use std::fmt;

use crate::error::StoryError;

/// The user's description of the story they want
///
/// Captured once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest(String);

impl StoryRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, StoryError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(StoryError::BlankRequest);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current candidate story
///
/// Revisions take a draft by value and hand back its replacement, so only
/// one draft is ever live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    /// Wrap model output, rejecting empty text
    pub fn from_output(text: impl Into<String>, stage: &'static str) -> Result<Self, StoryError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(StoryError::EmptyDraft { stage });
        }
        Ok(Self(text))
    }

    /// Wrap text without validation
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One answer from the user in the feedback loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackEntry {
    /// Empty line or end of input: keep the current draft
    Accept,
    /// Free-text revision instructions
    Revise(String),
}

impl FeedbackEntry {
    /// Interpret a raw input line
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Self::Accept
        } else {
            Self::Revise(line.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_trimmed() {
        let req = StoryRequest::new("  a shy turtle  \n").unwrap();
        assert_eq!(req.as_str(), "a shy turtle");
    }

    #[test]
    fn test_blank_request_rejected() {
        assert!(matches!(StoryRequest::new("   "), Err(StoryError::BlankRequest)));
    }

    #[test]
    fn test_draft_from_empty_output_fails() {
        let err = Draft::from_output(" \n\t", "storyteller").unwrap_err();
        assert!(matches!(err, StoryError::EmptyDraft { stage: "storyteller" }));
    }

    #[test]
    fn test_draft_from_output_trims() {
        let draft = Draft::from_output("\n# Title\n", "storyteller").unwrap();
        assert_eq!(draft.as_str(), "# Title");
        assert_eq!(draft.into_string(), "# Title");
    }

    #[test]
    fn test_feedback_from_line() {
        assert_eq!(FeedbackEntry::from_line(""), FeedbackEntry::Accept);
        assert_eq!(FeedbackEntry::from_line("   \n"), FeedbackEntry::Accept);
        assert_eq!(
            FeedbackEntry::from_line(" make it shorter "),
            FeedbackEntry::Revise("make it shorter".to_string())
        );
    }
}
