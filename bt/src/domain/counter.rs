//! Bounded revision counters

use tracing::debug;

/// Counts revisions in one loop and refuses to go past its cap
///
/// The count only ever goes up; `can_revise` is checked before each
/// revision, which is what guarantees both loops terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionCounter {
    count: u32,
    cap: u32,
}

impl RevisionCounter {
    pub fn new(cap: u32) -> Self {
        debug!(%cap, "RevisionCounter::new: called");
        Self { count: 0, cap }
    }

    /// Whether another revision is allowed
    pub fn can_revise(&self) -> bool {
        self.count < self.cap
    }

    /// Record one revision
    ///
    /// Saturates at the cap; callers check `can_revise` first.
    pub fn record(&mut self) {
        if self.can_revise() {
            self.count += 1;
        }
        debug!(count = self.count, cap = self.cap, "RevisionCounter::record: recorded");
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn exhausted(&self) -> bool {
        !self.can_revise()
    }
}

/// Revisions performed in each loop of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopCounters {
    pub qc_revisions: u32,
    pub feedback_revisions: u32,
}

impl LoopCounters {
    /// Total reviser calls across both loops
    pub fn total(&self) -> u32 {
        self.qc_revisions + self.feedback_revisions
    }
}
