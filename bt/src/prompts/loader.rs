//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::domain::Category;

/// Which agent a prompt belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Classifier,
    Storyteller,
    Judge,
    Reviser,
}

impl PromptKind {
    /// Get the template name for this prompt
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Storyteller => "storyteller",
            Self::Judge => "judge",
            Self::Reviser => "reviser",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// Context for rendering prompt templates
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    /// Every category label (classifier)
    pub categories: Vec<&'static str>,
    /// Chosen category label (storyteller, reviser)
    pub category: Option<&'static str>,
    /// Tone hint for the chosen category
    pub tone: Option<&'static str>,
    /// Rubric dimensions (judge)
    pub rubric: Vec<String>,
}

impl PromptContext {
    /// Context for the classifier
    pub fn classifier() -> Self {
        debug!("PromptContext::classifier: called");
        Self {
            categories: Category::ALL.iter().map(|c| c.label()).collect(),
            category: None,
            tone: None,
            rubric: vec![],
        }
    }

    /// Context for the storyteller and reviser
    pub fn for_category(category: Category) -> Self {
        debug!(%category, "PromptContext::for_category: called");
        Self {
            categories: vec![],
            category: Some(category.label()),
            tone: Some(category.tone()),
            rubric: vec![],
        }
    }

    /// Context for the judge
    pub fn judge(rubric: &[String]) -> Self {
        debug!(dimension_count = rubric.len(), "PromptContext::judge: called");
        Self {
            categories: vec![],
            category: None,
            tone: None,
            rubric: rubric.to_vec(),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directories, searched in order
    dirs: Vec<PathBuf>,
}

impl PromptLoader {
    /// Create a loader searching `prompts_dir` (if given) and `.bedtime/prompts/`
    pub fn new(prompts_dir: Option<&Path>) -> Self {
        debug!(?prompts_dir, "PromptLoader::new: called");
        let candidates = prompts_dir
            .map(Path::to_path_buf)
            .into_iter()
            .chain(std::iter::once(PathBuf::from(".bedtime/prompts")));

        let dirs: Vec<PathBuf> = candidates
            .filter(|dir| {
                let exists = dir.is_dir();
                debug!(?dir, %exists, "PromptLoader::new: checking directory");
                exists
            })
            .collect();

        Self {
            hbs: Self::engine(),
            dirs,
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            dirs: vec![],
        }
    }

    /// Prompts are plain text, so HTML escaping is turned off
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks each override directory for `{name}.pmt`, then the embedded copy.
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in &self.dirs {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: not found in override directory");
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, kind: PromptKind, context: &PromptContext) -> Result<String> {
        debug!(%kind, "PromptLoader::render: called");
        let template = self.load_template(kind.template_name())?;
        info!("Rendering template '{}'", kind);

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", kind, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RUBRIC;
    use tempfile::TempDir;

    #[test]
    fn test_render_classifier_lists_categories() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.render(PromptKind::Classifier, &PromptContext::classifier()).unwrap();

        assert!(prompt.contains("['animals', 'adventure', 'friendship', 'bedtime-calming', 'fantasy', 'other']"));
    }

    #[test]
    fn test_render_storyteller_includes_category_and_tone() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader
            .render(PromptKind::Storyteller, &PromptContext::for_category(Category::BedtimeCalming))
            .unwrap();

        assert!(prompt.contains("Category: bedtime-calming."));
        assert!(prompt.contains(Category::BedtimeCalming.tone()));
    }

    #[test]
    fn test_render_judge_lists_rubric_keys() {
        let loader = PromptLoader::embedded_only();
        let rubric: Vec<String> = DEFAULT_RUBRIC.iter().map(|s| s.to_string()).collect();
        let prompt = loader.render(PromptKind::Judge, &PromptContext::judge(&rubric)).unwrap();

        for dimension in DEFAULT_RUBRIC {
            assert!(prompt.contains(&format!("\"{}\":", dimension)), "missing {}", dimension);
        }
        assert!(prompt.contains("\"require_revision\""));
    }

    #[test]
    fn test_override_directory_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("reviser.pmt"), "Custom reviser for {{category}}").unwrap();

        let loader = PromptLoader::new(Some(dir.path()));
        let prompt = loader
            .render(PromptKind::Reviser, &PromptContext::for_category(Category::Animals))
            .unwrap();
        assert_eq!(prompt, "Custom reviser for animals");

        // Templates without an override still come from the embedded set
        let judge = loader
            .render(PromptKind::Judge, &PromptContext::judge(&["safety".to_string()]))
            .unwrap();
        assert!(judge.contains("Gentle Judge"));
    }

    #[test]
    fn test_missing_override_directory_is_ignored() {
        let loader = PromptLoader::new(Some(Path::new("/definitely/not/here")));
        assert!(loader.dirs.iter().all(|d| d != Path::new("/definitely/not/here")));
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}
