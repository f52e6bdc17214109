//! Bedtime configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::LlmError;

/// Rubric dimensions the judge scores by default
pub const DEFAULT_RUBRIC: [&str; 5] = ["coherence", "age_appropriateness", "warmth", "clarity", "safety"];

/// Main bedtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Revision loop caps
    pub loops: LoopsConfig,

    /// Per-agent sampling options
    pub stages: StagesConfig,

    /// Judge rubric
    pub rubric: RubricConfig,

    /// Extra directory searched first for `.pmt` prompt overrides
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: Option<PathBuf>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variable is set and that the
    /// rubric has something to judge. Call this early to fail fast.
    pub fn validate(&self) -> Result<()> {
        self.llm.api_key()?;
        if self.rubric.dimensions.is_empty() {
            return Err(eyre::eyre!("rubric.dimensions must name at least one criterion"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `./.bedtime.yml`, then `~/.config/bedtime/bedtime.yml`,
    /// then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".bedtime.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("bedtime").join("bedtime.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Upper bound on tokens per response, whatever a stage asks for
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, LlmError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LlmError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 1000,
            timeout_ms: 60_000,
        }
    }
}

/// Caps on the two revision loops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopsConfig {
    /// Reviser calls allowed in the judge loop before the user sees a draft
    #[serde(rename = "max-qc-revisions")]
    pub max_qc_revisions: u32,

    /// Reviser calls allowed in response to user feedback
    #[serde(rename = "max-feedback-revisions")]
    pub max_feedback_revisions: u32,
}

impl Default for LoopsConfig {
    fn default() -> Self {
        Self {
            max_qc_revisions: 2,
            max_feedback_revisions: 2,
        }
    }
}

/// Sampling options for one agent call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageOptions {
    pub temperature: f32,

    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl StageOptions {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Sampling options for every agent
///
/// Classification and judging run cold; storytelling runs warm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagesConfig {
    pub classifier: StageOptions,
    pub storyteller: StageOptions,
    pub judge: StageOptions,
    /// Reviser options during the judge loop
    pub reviser: StageOptions,
    /// Reviser options when applying user feedback
    pub feedback: StageOptions,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            classifier: StageOptions::new(0.0, 10),
            storyteller: StageOptions::new(0.7, 1000),
            judge: StageOptions::new(0.0, 500),
            reviser: StageOptions::new(0.5, 1000),
            feedback: StageOptions::new(0.6, 1000),
        }
    }
}

/// Judge rubric configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Criteria the judge comments on, one JSON key each
    pub dimensions: Vec<String>,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_RUBRIC.iter().map(|d| d.to_string()).collect(),
        }
    }
}
