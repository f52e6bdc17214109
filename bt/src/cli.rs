//! CLI argument parsing for bedtime

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Bedtime story generator (ages 5-10)
#[derive(Parser, Debug)]
#[command(name = "bt")]
#[command(author, version, about = "Bedtime story generator (ages 5-10)", long_about = None)]
pub struct Cli {
    /// Story request; asked for interactively when omitted
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Model to use, overriding the config file
    #[arg(short, long)]
    pub model: Option<String>,

    /// Judge/reviser rounds before the user sees a draft
    #[arg(long, value_name = "N")]
    pub max_qc_revisions: Option<u32>,

    /// Revisions the user may request
    #[arg(long, value_name = "N")]
    pub max_feedback_revisions: Option<u32>,

    /// Print the checked draft without asking for feedback
    #[arg(long)]
    pub no_feedback: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(n) = self.max_qc_revisions {
            config.loops.max_qc_revisions = n;
        }
        if let Some(n) = self.max_feedback_revisions {
            config.loops.max_feedback_revisions = n;
        }
    }
}
