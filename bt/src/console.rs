//! Terminal front end
//!
//! Reads the story request and feedback with rustyline and prints drafts.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::domain::{Draft, FeedbackEntry, StoryRequest};
use crate::error::StoryError;
use crate::pipeline::FeedbackChannel;

/// Interactive console session
pub struct Console {
    editor: DefaultEditor,
}

impl Console {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }

    /// Read one line; `None` on end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = line_from_readline(self.editor.readline(prompt))?;
        if let Some(line) = &line {
            let _ = self.editor.add_history_entry(line.as_str());
        }
        Ok(line)
    }

    /// Ask for the story request
    pub fn read_request(&mut self) -> Result<StoryRequest> {
        let line = self
            .read_line(&format!("{} ", "What kind of story do you want?".bright_cyan()))?
            .unwrap_or_default();
        Ok(StoryRequest::new(line)?)
    }

    /// Print the finished story
    pub fn print_final(&self, story: &Draft) {
        println!();
        println!("{}", "=== FINAL STORY ===".bright_cyan().bold());
        println!();
        println!("{}", story);
    }
}

/// Ctrl-D is end of input, Ctrl-C aborts the run
fn line_from_readline(read: Result<String, ReadlineError>) -> Result<Option<String>> {
    match read {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Eof) => {
            debug!("line_from_readline: end of input");
            Ok(None)
        }
        Err(ReadlineError::Interrupted) => {
            debug!("line_from_readline: interrupted");
            Err(StoryError::Interrupted.into())
        }
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}

/// End of input accepts the draft
fn feedback_from_line(line: Option<String>) -> FeedbackEntry {
    line.as_deref().map(FeedbackEntry::from_line).unwrap_or(FeedbackEntry::Accept)
}

impl FeedbackChannel for Console {
    fn present(&mut self, draft: &Draft, revision: u32) {
        let heading = if revision == 0 {
            "=== STORY DRAFT ===".to_string()
        } else {
            format!("=== STORY DRAFT (revision {}) ===", revision)
        };
        println!();
        println!("{}", heading.as_str().bright_cyan().bold());
        println!();
        println!("{}", draft);
    }

    fn read_feedback(&mut self) -> Result<FeedbackEntry> {
        println!();
        println!("How does that sound? Enter feedback (or press Enter to accept):");
        let line = self.read_line(&format!("{} ", ">".bright_green()))?;
        Ok(feedback_from_line(line))
    }

    fn accepted(&mut self) {
        println!();
        println!("{} Final story accepted.", "✓".green());
    }

    fn cap_reached(&mut self, cap: u32) {
        println!();
        println!(
            "{} Reached the limit of {} revisions; no further changes will be applied.",
            "!".yellow(),
            cap
        );
    }
}
