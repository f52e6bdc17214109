//! Story agents
//!
//! Each agent is one stateless request/response call to the model gateway.
//! They all borrow a [`Studio`], which owns the client handle, the prompt
//! loader and the per-stage settings for the lifetime of a run.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

mod classifier;
mod judge;
mod reviser;
mod storyteller;

pub use classifier::classify;
pub use judge::judge;
pub use reviser::revise;
pub use storyteller::tell;

use crate::config::{Config, StageOptions, StagesConfig};
use crate::llm::{self, CompletionRequest, LlmClient};
use crate::prompts::{PromptContext, PromptKind, PromptLoader};

/// Everything the agents need, created once at startup
pub struct Studio {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    stages: StagesConfig,
    rubric: Vec<String>,
}

impl Studio {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, stages: StagesConfig, rubric: Vec<String>) -> Self {
        debug!(rubric = ?rubric, "Studio::new: called");
        Self {
            llm,
            prompts,
            stages,
            rubric,
        }
    }

    /// Build a studio from loaded configuration
    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        let prompts = PromptLoader::new(config.prompts_dir.as_deref());
        Self::new(llm, prompts, config.stages, config.rubric.dimensions.clone())
    }

    pub fn stages(&self) -> &StagesConfig {
        &self.stages
    }

    pub fn rubric(&self) -> &[String] {
        &self.rubric
    }

    /// Render a system prompt, send it with one user message, return the text
    async fn call(
        &self,
        kind: PromptKind,
        context: &PromptContext,
        user: String,
        options: StageOptions,
    ) -> Result<String> {
        debug!(%kind, temperature = options.temperature, max_tokens = options.max_tokens, "Studio::call: called");
        let system_prompt = self.prompts.render(kind, context)?;
        let request = CompletionRequest::single(system_prompt, user)
            .with_temperature(options.temperature)
            .with_max_tokens(options.max_tokens);

        let text = llm::generate(self.llm.as_ref(), request)
            .await
            .map_err(crate::error::StoryError::from)?;
        Ok(text)
    }
}
