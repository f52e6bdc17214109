//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Category classifier prompt
pub const CLASSIFIER: &str = include_str!("../../prompts/classifier.pmt");

/// First-draft storyteller prompt
pub const STORYTELLER: &str = include_str!("../../prompts/storyteller.pmt");

/// Rubric judge prompt
pub const JUDGE: &str = include_str!("../../prompts/judge.pmt");

/// Reviser prompt
pub const REVISER: &str = include_str!("../../prompts/reviser.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "classifier" => Some(CLASSIFIER),
        "storyteller" => Some(STORYTELLER),
        "judge" => Some(JUDGE),
        "reviser" => Some(REVISER),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
