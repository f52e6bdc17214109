//! Judge verdicts and fail-closed parsing
//!
//! The judge is asked for a JSON object. Anything we cannot read with
//! confidence becomes a failing verdict.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Required change attached to verdicts built from unreadable judge output
pub const MALFORMED_CHANGE: &str = "Return the judge verdict as valid JSON";

/// Overall judge decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// Judge commentary on one rubric dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionNote {
    pub criterion: String,
    pub note: String,
}

/// Structured evaluation of one draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeVerdict {
    pub outcome: Outcome,
    pub notes: Vec<CriterionNote>,
    pub required_changes: Vec<String>,
    pub recommendations: Vec<String>,
    pub safety_flags: Vec<String>,
    pub summary: Option<String>,
    /// Set when the judge output could not be parsed
    pub malformed: bool,
}

/// Fields we read from the judge's JSON besides per-criterion notes
#[derive(Debug, Deserialize)]
struct RawVerdict {
    require_revision: bool,
    #[serde(default)]
    required_changes: StringList,
    #[serde(default)]
    recommendations: StringList,
    #[serde(default)]
    safety_flags: StringList,
    #[serde(default)]
    summary: Option<String>,
}

/// Placeholder answers models give for an empty list
const EMPTY_SENTINELS: &[&str] = &["none", "n/a", "na", "no", "null", "nil", "-"];

/// Models sometimes answer a list field with a single string
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum StringList {
    #[default]
    Empty,
    One(String),
    Many(Vec<Value>),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        let items = match self {
            StringList::Empty => vec![],
            StringList::One(s) => vec![s.trim().to_string()],
            StringList::Many(items) => items.iter().filter_map(value_text).collect(),
        };
        items.into_iter().filter(|item| !is_empty_sentinel(item)).collect()
    }
}

/// True for blank items and "none"-style placeholders
fn is_empty_sentinel(item: &str) -> bool {
    let normalized = item.trim().trim_end_matches('.').to_ascii_lowercase();
    normalized.is_empty() || EMPTY_SENTINELS.contains(&normalized.as_str())
}

impl JudgeVerdict {
    /// Verdict used when the judge output is unreadable
    pub fn malformed() -> Self {
        Self {
            outcome: Outcome::Fail,
            notes: vec![],
            required_changes: vec![MALFORMED_CHANGE.to_string()],
            recommendations: vec![],
            safety_flags: vec![],
            summary: None,
            malformed: true,
        }
    }

    /// Parse a judge response
    ///
    /// Never fails: unreadable input, a non-object, or a missing/non-boolean
    /// `require_revision` all yield a failing verdict. A pass with safety
    /// flags raised is also turned into a fail.
    pub fn parse(raw: &str, rubric: &[String]) -> Self {
        debug!(raw_len = raw.len(), "JudgeVerdict::parse: called");
        let body = strip_code_fence(raw);

        let object: Map<String, Value> = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                warn!(kind = %json_kind(&other), "JudgeVerdict::parse: judge output is not an object, failing closed");
                return Self::malformed();
            }
            Err(e) => {
                warn!(error = %e, "JudgeVerdict::parse: judge output is not JSON, failing closed");
                return Self::malformed();
            }
        };

        let parsed: RawVerdict = match serde_json::from_value(Value::Object(object.clone())) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "JudgeVerdict::parse: unexpected verdict shape, failing closed");
                return Self::malformed();
            }
        };

        let notes = rubric
            .iter()
            .filter_map(|criterion| {
                object.get(criterion).and_then(value_text).map(|note| CriterionNote {
                    criterion: criterion.clone(),
                    note,
                })
            })
            .collect();

        let safety_flags = parsed.safety_flags.into_vec();
        let outcome = if parsed.require_revision || !safety_flags.is_empty() {
            Outcome::Fail
        } else {
            Outcome::Pass
        };
        debug!(?outcome, safety_flag_count = safety_flags.len(), "JudgeVerdict::parse: parsed");

        Self {
            outcome,
            notes,
            required_changes: parsed.required_changes.into_vec(),
            recommendations: parsed.recommendations.into_vec(),
            safety_flags,
            summary: parsed.summary.filter(|s| !s.trim().is_empty()),
            malformed: false,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    /// Render the verdict as instructions for the reviser
    pub fn revision_instructions(&self) -> String {
        let mut out = String::from("Apply the judge's feedback.\n");

        if !self.safety_flags.is_empty() {
            out.push_str("\nSafety concerns (must be fixed):\n");
            for flag in &self.safety_flags {
                out.push_str(&format!("- {}\n", flag));
            }
        }
        if !self.required_changes.is_empty() {
            out.push_str("\nRequired changes:\n");
            for change in &self.required_changes {
                out.push_str(&format!("- {}\n", change));
            }
        }
        if !self.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for rec in &self.recommendations {
                out.push_str(&format!("- {}\n", rec));
            }
        }
        if !self.notes.is_empty() {
            out.push_str("\nRubric notes:\n");
            for note in &self.notes {
                out.push_str(&format!("- {}: {}\n", note.criterion, note.note));
            }
        }
        if let Some(summary) = &self.summary {
            out.push_str(&format!("\nSummary: {}\n", summary));
        }

        out
    }
}

/// Strip one surrounding Markdown code fence, if present
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string like `json` on the opening line
    match inner.find('\n') {
        Some(idx) if !inner[..idx].trim().contains(['{', '[']) => inner[idx + 1..].trim(),
        _ => inner.trim(),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RUBRIC;
    use proptest::prelude::*;

    fn rubric() -> Vec<String> {
        DEFAULT_RUBRIC.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_passing_verdict() {
        let raw = r#"{
            "require_revision": false,
            "coherence": "Clear setup, challenge and resolution.",
            "age_appropriateness": "Good for 5-10.",
            "warmth": {"score": 5},
            "safety_flags": [],
            "summary": "Lovely."
        }"#;

        let verdict = JudgeVerdict::parse(raw, &rubric());

        assert!(verdict.passed());
        assert!(!verdict.malformed);
        assert_eq!(verdict.notes.len(), 3);
        assert_eq!(verdict.notes[0].criterion, "coherence");
        assert_eq!(verdict.notes[2].note, r#"{"score":5}"#);
        assert_eq!(verdict.summary.as_deref(), Some("Lovely."));
    }

    #[test]
    fn test_parse_failing_verdict() {
        let raw = r#"{"require_revision": true, "required_changes": ["Shorten the middle"], "recommendations": "Add a lullaby"}"#;
        let verdict = JudgeVerdict::parse(raw, &rubric());

        assert_eq!(verdict.outcome, Outcome::Fail);
        assert!(!verdict.malformed);
        assert_eq!(verdict.required_changes, vec!["Shorten the middle"]);
        assert_eq!(verdict.recommendations, vec!["Add a lullaby"]);
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let raw = "```json\n{\"require_revision\": false}\n```";
        assert!(JudgeVerdict::parse(raw, &rubric()).passed());

        let raw = "```{\"require_revision\": false}```";
        assert!(JudgeVerdict::parse(raw, &rubric()).passed());
    }

    #[test]
    fn test_safety_flags_force_fail() {
        let raw = r#"{"require_revision": false, "safety_flags": ["scary monster under the bed"]}"#;
        let verdict = JudgeVerdict::parse(raw, &rubric());

        assert_eq!(verdict.outcome, Outcome::Fail);
        assert!(!verdict.malformed);
    }

    #[test]
    fn test_placeholder_safety_flags_do_not_fail() {
        let cases = [
            r#"{"require_revision": false, "safety_flags": ["None"]}"#,
            r#"{"require_revision": false, "safety_flags": "none"}"#,
            r#"{"require_revision": false, "safety_flags": ["N/A"]}"#,
            r#"{"require_revision": false, "safety_flags": ["null", "No.", " "]}"#,
        ];

        for raw in cases {
            let verdict = JudgeVerdict::parse(raw, &rubric());
            assert!(verdict.passed(), "input: {}", raw);
            assert!(verdict.safety_flags.is_empty(), "input: {}", raw);
        }
    }

    #[test]
    fn test_real_flag_next_to_placeholder_still_fails() {
        let raw = r#"{"require_revision": false, "safety_flags": ["none", "a wolf eats the rabbit"]}"#;
        let verdict = JudgeVerdict::parse(raw, &rubric());

        assert_eq!(verdict.outcome, Outcome::Fail);
        assert_eq!(verdict.safety_flags, vec!["a wolf eats the rabbit"]);
    }

    #[test]
    fn test_malformed_inputs_fail_closed() {
        let cases = [
            "",
            "Looks great to me!",
            "{\"require_revision\": false",
            "[]",
            "true",
            "{}",
            r#"{"require_revision": "no"}"#,
            r#"{"require_revision": null}"#,
            r#"{"summary": "fine"}"#,
        ];

        for raw in cases {
            let verdict = JudgeVerdict::parse(raw, &rubric());
            assert_eq!(verdict.outcome, Outcome::Fail, "input: {:?}", raw);
            assert!(verdict.malformed, "input: {:?}", raw);
            assert_eq!(verdict.required_changes, vec![MALFORMED_CHANGE]);
        }
    }

    #[test]
    fn test_revision_instructions_include_everything() {
        let raw = r#"{
            "require_revision": true,
            "clarity": "Some words are too long.",
            "safety_flags": ["mild peril"],
            "required_changes": ["Use simpler words"],
            "recommendations": ["End with a hug"],
            "summary": "Almost there."
        }"#;
        let text = JudgeVerdict::parse(raw, &rubric()).revision_instructions();

        assert!(text.contains("mild peril"));
        assert!(text.contains("Use simpler words"));
        assert!(text.contains("End with a hug"));
        assert!(text.contains("clarity: Some words are too long."));
        assert!(text.contains("Almost there."));
    }

    #[test]
    fn test_malformed_instructions_ask_for_json() {
        let text = JudgeVerdict::malformed().revision_instructions();
        assert!(text.contains(MALFORMED_CHANGE));
    }

    proptest! {
        #[test]
        fn prop_non_object_text_always_fails(raw in "[^{]*") {
            let verdict = JudgeVerdict::parse(&raw, &rubric());
            prop_assert_eq!(verdict.outcome, Outcome::Fail);
        }

        #[test]
        fn prop_objects_without_boolean_flag_fail(key in "[a-z_]{1,12}", value in "[a-zA-Z ]{0,20}") {
            prop_assume!(key != "require_revision");
            let raw = serde_json::json!({ key: value }).to_string();
            let verdict = JudgeVerdict::parse(&raw, &rubric());
            prop_assert_eq!(verdict.outcome, Outcome::Fail);
            prop_assert!(verdict.malformed);
        }
    }
}
