//! First-draft storyteller

use eyre::Result;
use tracing::{debug, info};

use super::Studio;
use crate::domain::{Category, Draft, StoryRequest};
use crate::prompts::{PromptContext, PromptKind};

/// Write the first draft
///
/// There is nothing to fall back to here, so empty output is fatal.
pub async fn tell(studio: &Studio, request: &StoryRequest, category: Category) -> Result<Draft> {
    debug!(%category, "tell: called");
    let text = studio
        .call(
            PromptKind::Storyteller,
            &PromptContext::for_category(category),
            request.as_str().to_string(),
            studio.stages().storyteller,
        )
        .await?;

    let draft = Draft::from_output(text, "storyteller")?;
    info!(draft_len = draft.as_str().len(), "tell: first draft written");
    Ok(draft)
}
