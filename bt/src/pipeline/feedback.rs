//! User feedback loop
//!
//! Show the draft, read a line of feedback, revise, repeat. An empty answer
//! accepts the current draft. Once the revision cap is spent, further
//! feedback is declined and the latest draft becomes final.

use eyre::Result;
use tracing::{debug, info};

use crate::agents::{self, Studio};
use crate::domain::{Category, Draft, FeedbackEntry, RevisionCounter, StoryRequest};

/// Where drafts are shown and feedback comes from
///
/// Calls block until the user answers.
pub trait FeedbackChannel {
    /// Show the current draft; `revision` is how many user revisions it has had
    fn present(&mut self, draft: &Draft, revision: u32);

    /// Wait for the user's answer
    fn read_feedback(&mut self) -> Result<FeedbackEntry>;

    /// The user accepted the draft
    fn accepted(&mut self);

    /// The user asked for more changes after the cap was spent
    fn cap_reached(&mut self, cap: u32);
}

/// Result of the feedback loop
#[derive(Debug, Clone)]
pub struct FeedbackOutcome {
    /// The final story
    pub draft: Draft,
    /// Reviser calls made
    pub revisions: u32,
    /// True when the loop ended because the cap was spent
    pub cap_reached: bool,
}

/// Run the feedback loop on a QC'd draft
pub async fn run_feedback(
    studio: &Studio,
    request: &StoryRequest,
    category: Category,
    draft: Draft,
    max_revisions: u32,
    channel: &mut dyn FeedbackChannel,
) -> Result<FeedbackOutcome> {
    debug!(%max_revisions, "run_feedback: called");
    let mut counter = RevisionCounter::new(max_revisions);
    let mut draft = draft;

    loop {
        channel.present(&draft, counter.count());

        match channel.read_feedback()? {
            FeedbackEntry::Accept => {
                info!(revisions = counter.count(), "run_feedback: draft accepted");
                channel.accepted();
                return Ok(FeedbackOutcome {
                    draft,
                    revisions: counter.count(),
                    cap_reached: false,
                });
            }
            FeedbackEntry::Revise(_) if counter.exhausted() => {
                info!(revisions = counter.count(), "run_feedback: revision cap reached, finalizing");
                channel.cap_reached(counter.cap());
                return Ok(FeedbackOutcome {
                    draft,
                    revisions: counter.count(),
                    cap_reached: true,
                });
            }
            FeedbackEntry::Revise(text) => {
                debug!(revision = counter.count() + 1, feedback = %text, "run_feedback: revising");
                draft = agents::revise(studio, request, category, draft, &text, studio.stages().feedback).await?;
                counter.record();
            }
        }
    }
}
