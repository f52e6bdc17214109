//! Domain types threaded through the story pipeline

mod category;
mod counter;
mod story;
mod verdict;

pub use category::Category;
pub use counter::{LoopCounters, RevisionCounter};
pub use story::{Draft, FeedbackEntry, StoryRequest};
pub use verdict::{CriterionNote, JudgeVerdict, Outcome};
