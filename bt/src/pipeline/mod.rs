//! Story pipeline
//!
//! request -> classify -> tell -> QC loop -> feedback loop -> final story.
//! Every stage waits on the one before it; the only state carried forward is
//! the current draft and the two revision counts.

use eyre::Result;
use tracing::{debug, info};

mod feedback;
mod qc;

pub use feedback::{FeedbackChannel, FeedbackOutcome, run_feedback};
pub use qc::{QcOutcome, run_qc};

#[cfg(test)]
pub(crate) use feedback::testing::ScriptedChannel;

use crate::agents::{self, Studio};
use crate::config::LoopsConfig;
use crate::domain::{Category, Draft, LoopCounters, StoryRequest};

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct StoryOutcome {
    pub category: Category,
    pub story: Draft,
    pub counters: LoopCounters,
    /// Whether the judge approved the draft that left the QC loop
    pub qc_passed: bool,
    /// Whether the feedback loop ended on its cap
    pub feedback_cap_reached: bool,
}

/// Run the whole pipeline for one request
///
/// With no feedback channel the QC'd draft is final.
pub async fn run_story(
    studio: &Studio,
    request: &StoryRequest,
    loops: LoopsConfig,
    channel: Option<&mut dyn FeedbackChannel>,
) -> Result<StoryOutcome> {
    debug!(?loops, interactive = channel.is_some(), "run_story: called");

    let category = agents::classify(studio, request).await?;
    let draft = agents::tell(studio, request, category).await?;

    let qc = run_qc(studio, request, category, draft, loops.max_qc_revisions).await?;
    let qc_passed = qc.passed();
    let mut counters = LoopCounters {
        qc_revisions: qc.revisions,
        feedback_revisions: 0,
    };

    let (story, feedback_cap_reached) = match channel {
        Some(channel) => {
            let outcome = run_feedback(
                studio,
                request,
                category,
                qc.draft,
                loops.max_feedback_revisions,
                channel,
            )
            .await?;
            counters.feedback_revisions = outcome.revisions;
            (outcome.draft, outcome.cap_reached)
        }
        None => {
            debug!("run_story: no feedback channel, QC draft is final");
            (qc.draft, false)
        }
    };

    info!(
        %category,
        qc_passed,
        qc_revisions = counters.qc_revisions,
        feedback_revisions = counters.feedback_revisions,
        "run_story: story finalized"
    );

    Ok(StoryOutcome {
        category,
        story,
        counters,
        qc_passed,
        feedback_cap_reached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::studio;
    use crate::error::StoryError;
    use crate::llm::client::mock::MockLlmClient;
    use std::sync::Arc;

    const PASS: &str = r#"{"require_revision": false}"#;
    const FAIL: &str = r#"{"require_revision": true}"#;

    #[tokio::test]
    async fn test_happy_path_without_revisions() {
        let mock = Arc::new(MockLlmClient::with_texts(&["animals", "# Tilly Sings", PASS]));
        let studio = studio(mock.clone());
        let request = StoryRequest::new("a story about a shy turtle who learns to sing").unwrap();
        let mut channel = ScriptedChannel::new(&[""]);

        let outcome = run_story(&studio, &request, LoopsConfig::default(), Some(&mut channel))
            .await
            .unwrap();

        assert_eq!(outcome.category, Category::Animals);
        assert_eq!(outcome.story.as_str(), "# Tilly Sings");
        assert_eq!(outcome.counters.total(), 0);
        assert!(outcome.qc_passed);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_no_channel_returns_qc_draft() {
        let mock = Arc::new(MockLlmClient::with_texts(&["fantasy", "v1", FAIL, "v2", PASS]));
        let studio = studio(mock);
        let request = StoryRequest::new("a dragon who is afraid of the dark").unwrap();

        let outcome = run_story(&studio, &request, LoopsConfig::default(), None).await.unwrap();

        assert_eq!(outcome.story.as_str(), "v2");
        assert_eq!(outcome.counters.qc_revisions, 1);
        assert_eq!(outcome.counters.feedback_revisions, 0);
        assert!(!outcome.feedback_cap_reached);
    }

    #[tokio::test]
    async fn test_empty_first_draft_aborts() {
        let mock = Arc::new(MockLlmClient::with_texts(&["animals", ""]));
        let studio = studio(mock.clone());
        let request = StoryRequest::new("a shy turtle").unwrap();

        let err = run_story(&studio, &request, LoopsConfig::default(), None)
            .await
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<StoryError>(), Some(StoryError::EmptyDraft { .. })));
        // Nothing is judged after the storyteller fails
        assert_eq!(mock.call_count(), 2);
    }
}
