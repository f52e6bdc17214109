//! Model gateway
//!
//! Sends prompts to a hosted text-generation service and returns raw text.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Only "openai" (and API-compatible endpoints via `base-url`) is supported.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: openai",
                other
            )))
        }
    }
}

/// Run one completion and return its text
///
/// Missing content comes back as an empty string; deciding whether that is
/// acceptable is left to the calling agent.
pub async fn generate(llm: &dyn LlmClient, request: CompletionRequest) -> Result<String, LlmError> {
    debug!(
        system_prompt_len = request.system_prompt.len(),
        temperature = ?request.temperature,
        max_tokens = request.max_tokens,
        "generate: called"
    );
    let response = llm.complete(request).await?;
    debug!(
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        stop_reason = ?response.stop_reason,
        "generate: completed"
    );
    if response.stop_reason == StopReason::MaxTokens {
        tracing::warn!("generate: response truncated at max_tokens");
    }
    Ok(response.into_text())
}
