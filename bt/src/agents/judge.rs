//! Rubric judge

use eyre::Result;
use tracing::{debug, info, warn};

use super::Studio;
use crate::domain::{Draft, JudgeVerdict, StoryRequest};
use crate::prompts::{PromptContext, PromptKind};

/// Evaluate a draft against the rubric
///
/// Unreadable judge output becomes a failing verdict rather than an error.
pub async fn judge(studio: &Studio, request: &StoryRequest, draft: &Draft) -> Result<JudgeVerdict> {
    debug!(draft_len = draft.as_str().len(), "judge: called");
    let user = format!("USER REQUEST:\n{}\n\nSTORY:\n{}", request, draft);
    let raw = studio
        .call(
            PromptKind::Judge,
            &PromptContext::judge(studio.rubric()),
            user,
            studio.stages().judge,
        )
        .await?;

    let verdict = JudgeVerdict::parse(&raw, studio.rubric());
    if verdict.malformed {
        warn!("judge: malformed verdict treated as a rejection");
    }
    info!(outcome = ?verdict.outcome, "judge: verdict");
    Ok(verdict)
}
