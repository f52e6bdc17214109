//! Bedtime - story generator CLI
//!
//! Entry point: load config, build the model client, run the pipeline.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use bedtime::Studio;
use bedtime::cli::Cli;
use bedtime::config::Config;
use bedtime::console::Console;
use bedtime::domain::StoryRequest;
use bedtime::llm::create_client;
use bedtime::pipeline::{FeedbackChannel, run_story};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logs go to a file; stdout is reserved for the story
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bedtime")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("bedtime.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let run_id = Uuid::now_v7();
    info!(%run_id, model = %config.llm.model, loops = ?config.loops, "bedtime starting");

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let studio = Studio::from_config(llm, &config);

    let mut console = Console::new()?;
    let request = match cli.prompt.as_deref() {
        Some(text) => StoryRequest::new(text)?,
        None => {
            debug!("main: no --prompt, asking interactively");
            console.read_request()?
        }
    };

    let outcome = if cli.no_feedback {
        run_story(&studio, &request, config.loops, None).await?
    } else {
        run_story(&studio, &request, config.loops, Some(&mut console as &mut dyn FeedbackChannel)).await?
    };

    console.print_final(&outcome.story);
    info!(
        %run_id,
        category = %outcome.category,
        qc_passed = outcome.qc_passed,
        revisions = outcome.counters.total(),
        "bedtime finished"
    );
    Ok(())
}
