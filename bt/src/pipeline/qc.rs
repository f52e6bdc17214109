//! Internal quality-check loop
//!
//! Judge the draft; on a fail, revise with the verdict and judge again, up to
//! the configured number of revisions. When the cap is hit the latest draft
//! goes forward anyway so the user is never blocked.

use eyre::Result;
use tracing::{debug, info, warn};

use crate::agents::{self, Studio};
use crate::domain::{Category, Draft, JudgeVerdict, RevisionCounter, StoryRequest};

/// Result of the QC loop
#[derive(Debug, Clone)]
pub struct QcOutcome {
    /// Draft forwarded to the feedback loop
    pub draft: Draft,
    /// Reviser calls made
    pub revisions: u32,
    /// Judge calls made
    pub judged: u32,
    /// Verdict on the forwarded draft
    pub last_verdict: JudgeVerdict,
}

impl QcOutcome {
    /// Whether the forwarded draft actually passed
    pub fn passed(&self) -> bool {
        self.last_verdict.passed()
    }
}

/// Run the judge/reviser loop on a first draft
pub async fn run_qc(
    studio: &Studio,
    request: &StoryRequest,
    category: Category,
    draft: Draft,
    max_revisions: u32,
) -> Result<QcOutcome> {
    debug!(%max_revisions, "run_qc: called");
    let mut counter = RevisionCounter::new(max_revisions);
    let mut draft = draft;
    let mut judged = 0;

    loop {
        let verdict = agents::judge(studio, request, &draft).await?;
        judged += 1;

        if verdict.passed() {
            info!(revisions = counter.count(), judged, "run_qc: draft passed");
            return Ok(QcOutcome {
                draft,
                revisions: counter.count(),
                judged,
                last_verdict: verdict,
            });
        }

        if counter.exhausted() {
            warn!(
                revisions = counter.count(),
                judged, "run_qc: revision cap reached, forwarding latest draft"
            );
            return Ok(QcOutcome {
                draft,
                revisions: counter.count(),
                judged,
                last_verdict: verdict,
            });
        }

        debug!(revision = counter.count() + 1, "run_qc: revising after failed verdict");
        let instructions = verdict.revision_instructions();
        draft = agents::revise(studio, request, category, draft, &instructions, studio.stages().reviser).await?;
        counter.record();
    }
}
