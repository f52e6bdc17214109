//! Draft reviser
//!
//! Used by both loops with the same contract: old draft plus instructions in,
//! new draft out. It does not know which loop called it.

use eyre::Result;
use tracing::{debug, info};

use super::Studio;
use crate::config::StageOptions;
use crate::domain::{Category, Draft, StoryRequest};
use crate::prompts::{PromptContext, PromptKind};

/// Produce a revised draft
///
/// Consumes the old draft; the returned one replaces it unconditionally.
pub async fn revise(
    studio: &Studio,
    request: &StoryRequest,
    category: Category,
    draft: Draft,
    instructions: &str,
    options: StageOptions,
) -> Result<Draft> {
    debug!(%category, instructions_len = instructions.len(), "revise: called");
    let user = format!(
        "ORIGINAL REQUEST:\n{}\n\nCURRENT STORY:\n{}\n\nFEEDBACK:\n{}",
        request, draft, instructions
    );
    let text = studio
        .call(PromptKind::Reviser, &PromptContext::for_category(category), user, options)
        .await?;

    let revised = Draft::new(text.trim());
    info!(
        old_len = draft.as_str().len(),
        new_len = revised.as_str().len(),
        "revise: draft replaced"
    );
    Ok(revised)
}
