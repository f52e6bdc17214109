//! Bedtime - children's story generator
//!
//! Chains model calls into a small pipeline: classify the request, write a
//! first draft, run it past a rubric judge (revising on failure, up to a cap),
//! then let the user ask for a bounded number of further revisions.
//!
//! # Modules
//!
//! - [`llm`] - Model gateway trait and OpenAI implementation
//! - [`agents`] - Classifier, storyteller, judge and reviser
//! - [`pipeline`] - QC and user feedback loops
//! - [`domain`] - Requests, drafts, categories, verdicts
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - Configuration types and loading
//! - [`console`] - Terminal input and output
//! - [`cli`] - Command-line interface

pub mod agents;
pub mod cli;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompts;

// Re-export commonly used types
pub use agents::Studio;
pub use config::{Config, LlmConfig, LoopsConfig, StageOptions, StagesConfig};
pub use domain::{Category, Draft, FeedbackEntry, JudgeVerdict, LoopCounters, Outcome, StoryRequest};
pub use error::StoryError;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use pipeline::{FeedbackChannel, FeedbackOutcome, QcOutcome, StoryOutcome, run_feedback, run_qc, run_story};
pub use prompts::{PromptContext, PromptKind, PromptLoader};
