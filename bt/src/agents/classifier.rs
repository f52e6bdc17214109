//! Request classifier

use eyre::Result;
use tracing::{debug, info};

use super::Studio;
use crate::domain::{Category, StoryRequest};
use crate::prompts::{PromptContext, PromptKind};

/// Assign a category to a story request
///
/// Unrecognized answers fall back to [`Category::Other`]; only gateway
/// failures are errors.
pub async fn classify(studio: &Studio, request: &StoryRequest) -> Result<Category> {
    debug!(request_len = request.as_str().len(), "classify: called");
    let raw = studio
        .call(
            PromptKind::Classifier,
            &PromptContext::classifier(),
            request.as_str().to_string(),
            studio.stages().classifier,
        )
        .await?;

    let category = Category::parse(&raw);
    info!(%category, "classify: request classified");
    Ok(category)
}
