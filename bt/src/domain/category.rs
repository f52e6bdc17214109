//! Story categories

use std::fmt;

use tracing::{debug, warn};

/// Coarse tone/topic label assigned to a story request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Animals,
    Adventure,
    Friendship,
    BedtimeCalming,
    Fantasy,
    #[default]
    Other,
}

impl Category {
    /// Every category, in the order shown to the classifier
    pub const ALL: [Category; 6] = [
        Category::Animals,
        Category::Adventure,
        Category::Friendship,
        Category::BedtimeCalming,
        Category::Fantasy,
        Category::Other,
    ];

    /// Label the classifier is asked to answer with
    pub fn label(&self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Adventure => "adventure",
            Self::Friendship => "friendship",
            Self::BedtimeCalming => "bedtime-calming",
            Self::Fantasy => "fantasy",
            Self::Other => "other",
        }
    }

    /// Tone instructions handed to the storyteller and reviser
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Animals => "Give the animal characters gentle, relatable feelings and playful details.",
            Self::Adventure => "Keep the excitement light and safe; the challenge is solved with courage and cleverness.",
            Self::Friendship => "Focus on kindness, sharing and making up after small disagreements.",
            Self::BedtimeCalming => "Use a slow, soothing rhythm with soft imagery, winding down toward sleep.",
            Self::Fantasy => "Let the magic be wondrous but never frightening.",
            Self::Other => "Keep it warm, simple and comforting.",
        }
    }

    /// Map a classifier response to a category
    ///
    /// Tolerates case, whitespace, quotes, trailing punctuation, a leading
    /// `category:` and space/underscore separators. Anything else is `Other`.
    pub fn parse(raw: &str) -> Self {
        debug!(%raw, "Category::parse: called");
        let normalized = normalize(raw);
        let normalized = normalized.strip_prefix("category:").map(str::trim).unwrap_or(normalized.as_str());

        match Self::ALL.iter().find(|c| c.label() == normalized) {
            Some(category) => {
                debug!(category = %category, "Category::parse: matched");
                *category
            }
            None => {
                warn!(%raw, "Category::parse: unrecognized label, falling back to other");
                Self::Other
            }
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '!' | '[' | ']'))
        .trim()
        .to_lowercase()
        .replace(['_', ' '], "-")
        .replace("category:-", "category:")
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_labels() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.label()), category);
        }
    }

    #[test]
    fn test_parse_is_forgiving() {
        assert_eq!(Category::parse("  Animals\n"), Category::Animals);
        assert_eq!(Category::parse("\"adventure\"."), Category::Adventure);
        assert_eq!(Category::parse("Bedtime Calming"), Category::BedtimeCalming);
        assert_eq!(Category::parse("bedtime_calming"), Category::BedtimeCalming);
        assert_eq!(Category::parse("Category: fantasy"), Category::Fantasy);
        assert_eq!(Category::parse("'friendship'"), Category::Friendship);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_other() {
        assert_eq!(Category::parse("dinosaurs"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
        assert_eq!(Category::parse("animals and adventure"), Category::Other);
    }

    #[test]
    fn test_every_category_has_tone() {
        for category in Category::ALL {
            assert!(!category.tone().is_empty());
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Category::BedtimeCalming.to_string(), "bedtime-calming");
    }
}
