use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::models::InterjectionCategory;

/// Layout of a cleaned interjection marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// `(APPLAUSE)`
    Normal,
    /// `(APPLAUSE) TRUMP continues` - a marker followed by free text
    NormalPlus,
    /// `(APPLAUSE) (BOOS)` - several markers glued together
    Double,
    /// Anything else; dropped from the marker list
    Other,
}

/// Marker text (inside the parentheses) -> category
static INTERJECTION_CATEGORIES: &[(&str, InterjectionCategory)] = &[
    ("APPLAUSE", InterjectionCategory::AudienceApplause),
    ("APPLAUSES", InterjectionCategory::AudienceApplause),
    ("APPLAUDING", InterjectionCategory::AudienceApplause),
    ("AUDIENCE APPLAUSE", InterjectionCategory::AudienceApplause),
    ("CHEERING", InterjectionCategory::AudienceApplause),
    ("CHEERS", InterjectionCategory::AudienceApplause),
    ("CHEERS AND APPLAUSE", InterjectionCategory::AudienceApplause),
    ("APPLAUSE AND CHEERS", InterjectionCategory::AudienceApplause),
    ("BOO", InterjectionCategory::AudienceBooing),
    ("BOOS", InterjectionCategory::AudienceBooing),
    ("BOOING", InterjectionCategory::AudienceBooing),
    ("AUDIENCE BOOING", InterjectionCategory::AudienceBooing),
    ("LAUGHTER", InterjectionCategory::AudienceLaughter),
    ("LAUGHING", InterjectionCategory::AudienceLaughter),
    ("AUDIENCE LAUGHTER", InterjectionCategory::AudienceLaughter),
    ("APPLAUSE AND BOOING", InterjectionCategory::AudienceMixed),
    ("APPLAUSE AND BOOS", InterjectionCategory::AudienceMixed),
    ("BOOING AND APPLAUSE", InterjectionCategory::AudienceMixed),
    ("BOOS AND APPLAUSE", InterjectionCategory::AudienceMixed),
    ("CHEERING AND BOOING", InterjectionCategory::AudienceMixed),
    ("APPLAUSE AND LAUGHTER", InterjectionCategory::AudienceMixed),
    ("LAUGHTER AND APPLAUSE", InterjectionCategory::AudienceMixed),
    ("MIXED REACTION", InterjectionCategory::AudienceMixed),
    ("MIXED REACTIONS", InterjectionCategory::AudienceMixed),
    ("AUDIENCE REACTION", InterjectionCategory::AudienceMixed),
    ("GROANS", InterjectionCategory::AudienceMixed),
    ("GASPS", InterjectionCategory::AudienceMixed),
    ("CROSSTALK", InterjectionCategory::CandidateCrosstalk),
    ("CROSS TALK", InterjectionCategory::CandidateCrosstalk),
    ("CROSS-TALK", InterjectionCategory::CandidateCrosstalk),
    ("OVERTALK", InterjectionCategory::CandidateCrosstalk),
    ("OFF-MIKE", InterjectionCategory::CandidateCrosstalk),
    ("OFF MIKE", InterjectionCategory::CandidateCrosstalk),
    ("INTERRUPTING", InterjectionCategory::CandidateCrosstalk),
    ("SPEAKING SIMULTANEOUSLY", InterjectionCategory::CandidateCrosstalk),
    ("SPANISH", InterjectionCategory::CandidateSpanish),
    ("SPEAKING SPANISH", InterjectionCategory::CandidateSpanish),
    ("SPEAKING IN SPANISH", InterjectionCategory::CandidateSpanish),
    ("SPEAKS SPANISH", InterjectionCategory::CandidateSpanish),
    ("FOREIGN LANGUAGE", InterjectionCategory::CandidateSpanish),
    ("THROUGH TRANSLATOR", InterjectionCategory::CandidateSpanish),
    ("PAUSE", InterjectionCategory::CandidateStalling),
    ("PAUSES", InterjectionCategory::CandidateStalling),
    ("LONG PAUSE", InterjectionCategory::CandidateStalling),
    ("SIGH", InterjectionCategory::CandidateStalling),
    ("SIGHS", InterjectionCategory::CandidateStalling),
    ("CLEARS THROAT", InterjectionCategory::CandidateStalling),
    ("COUGHS", InterjectionCategory::CandidateStalling),
    ("STAMMERS", InterjectionCategory::CandidateStalling),
    ("BELL", InterjectionCategory::DebateBell),
    ("BELL RINGS", InterjectionCategory::DebateBell),
    ("BELL RINGING", InterjectionCategory::DebateBell),
    ("BELL SOUNDS", InterjectionCategory::DebateBell),
    ("RINGS BELL", InterjectionCategory::DebateBell),
    ("TIME BELL", InterjectionCategory::DebateBell),
    ("BUZZER", InterjectionCategory::DebateBell),
    ("BUZZER SOUNDS", InterjectionCategory::DebateBell),
    ("DING", InterjectionCategory::DebateBell),
    ("COMMERCIAL BREAK", InterjectionCategory::Media),
    ("BREAK", InterjectionCategory::Media),
    ("VIDEO", InterjectionCategory::Media),
    ("VIDEO CLIP", InterjectionCategory::Media),
    ("BEGIN VIDEO CLIP", InterjectionCategory::Media),
    ("START VIDEO CLIP", InterjectionCategory::Media),
    ("END VIDEO CLIP", InterjectionCategory::Media),
    ("VIDEOTAPE", InterjectionCategory::Media),
    ("BEGIN VIDEOTAPE", InterjectionCategory::Media),
    ("END VIDEOTAPE", InterjectionCategory::Media),
    ("MUSIC", InterjectionCategory::Media),
    ("NATIONAL ANTHEM", InterjectionCategory::Media),
    ("INAUDIBLE", InterjectionCategory::Unintelligible),
    ("UNINTELLIGIBLE", InterjectionCategory::Unintelligible),
    ("UNCLEAR", InterjectionCategory::Unintelligible),
    ("UNKNOWN", InterjectionCategory::Unintelligible),
    ("INAUDIBLE QUESTION", InterjectionCategory::Unintelligible),
    ("INAUDIBLE ANSWER", InterjectionCategory::Unintelligible),
];

static CATEGORY_INDEX: LazyLock<HashMap<&'static str, InterjectionCategory>> =
    LazyLock::new(|| INTERJECTION_CATEGORIES.iter().copied().collect());

/// First cleaning pass over a raw marker
///
/// Returns `None` for anything that does not open with `(` after trimming.
/// Glued groups `)(` are spaced apart and periods removed.
pub fn clean_marker(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('(') {
        return None;
    }
    Some(trimmed.replace(")(", ") (").replace('.', ""))
}

/// Shape of a marker that already went through [`clean_marker`]
pub fn marker_shape(cleaned: &str) -> MarkerShape {
    if cleaned.contains(") (") {
        MarkerShape::Double
    } else if cleaned.starts_with('(') && cleaned.contains(") ") {
        MarkerShape::NormalPlus
    } else if cleaned.starts_with('(') && cleaned.ends_with(')') {
        MarkerShape::Normal
    } else {
        MarkerShape::Other
    }
}

/// Reduce one raw marker to zero or more single, well-formed markers
pub fn split_marker(raw: &str) -> Vec<String> {
    let Some(cleaned) = clean_marker(raw) else {
        return Vec::new();
    };

    match marker_shape(&cleaned) {
        MarkerShape::Normal => vec![cleaned],
        MarkerShape::NormalPlus => {
            let head = cleaned.split(')').next().unwrap_or_default();
            vec![format!("{})", head)]
        }
        MarkerShape::Double => cleaned
            .split(')')
            .filter(|fragment| fragment.contains('('))
            .map(|fragment| format!("{})", fragment.trim()))
            .collect(),
        MarkerShape::Other => {
            debug!("Discarding malformed interjection marker {:?}", raw);
            Vec::new()
        }
    }
}

/// Clean a list of raw markers, keeping order and duplicates
pub fn clean_markers<S: AsRef<str>>(raw_markers: &[S]) -> Vec<String> {
    raw_markers
        .iter()
        .flat_map(|raw| split_marker(raw.as_ref()))
        .collect()
}

/// Lookup key for a marker: inner text, upper-cased, whitespace collapsed
fn category_key(marker: &str) -> String {
    let inner = marker.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Category of a single marker
///
/// `Other` when the table has no entry, and for anything that is not one
/// self-contained parenthetical such as a dangling `(INAUDIBLE`.
pub fn classify_marker(marker: &str) -> InterjectionCategory {
    if marker_shape(marker.trim()) != MarkerShape::Normal {
        return InterjectionCategory::Other;
    }
    CATEGORY_INDEX
        .get(category_key(marker).as_str())
        .copied()
        .unwrap_or(InterjectionCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_marker() {
        assert_eq!(clean_marker("  (APPLAUSE.) "), Some("(APPLAUSE)".to_string()));
        assert_eq!(
            clean_marker("(APPLAUSE)(BOOS)"),
            Some("(APPLAUSE) (BOOS)".to_string())
        );
        assert_eq!(clean_marker("APPLAUSE)"), None);
        assert_eq!(clean_marker(""), None);
    }

    #[test]
    fn test_marker_shapes() {
        assert_eq!(marker_shape("(APPLAUSE)"), MarkerShape::Normal);
        assert_eq!(marker_shape("(LAUGHTER) TRUMP continues"), MarkerShape::NormalPlus);
        assert_eq!(marker_shape("(APPLAUSE) (BOOS)"), MarkerShape::Double);
        assert_eq!(marker_shape("(INAUDIBLE"), MarkerShape::Other);
    }

    #[test]
    fn test_compound_marker_splits() {
        assert_eq!(split_marker("(APPLAUSE)(BOOS)"), vec!["(APPLAUSE)", "(BOOS)"]);
        assert_eq!(
            split_marker("(APPLAUSE) (BOOS) KASICH"),
            vec!["(APPLAUSE)", "(BOOS)"]
        );
    }

    #[test]
    fn test_trailing_text_is_dropped() {
        assert_eq!(split_marker("(LAUGHTER) TRUMP continues"), vec!["(LAUGHTER)"]);
    }

    #[test]
    fn test_unmatched_parenthesis_is_discarded() {
        assert!(split_marker("(INAUDIBLE").is_empty());
        assert!(split_marker("CROSSTALK)").is_empty());
        assert_eq!(classify_marker("(INAUDIBLE"), InterjectionCategory::Other);
        assert_eq!(classify_marker("(INAUDIBLE)"), InterjectionCategory::Unintelligible);
        assert_eq!(classify_marker("((("), InterjectionCategory::Other);
    }

    #[test]
    fn test_clean_markers_preserves_order_and_duplicates() {
        let cleaned = clean_markers(&[
            "(LAUGHTER)",
            "(APPLAUSE)(BOOS)",
            "NOT A MARKER",
            "(LAUGHTER)",
        ]);
        assert_eq!(cleaned, vec!["(LAUGHTER)", "(APPLAUSE)", "(BOOS)", "(LAUGHTER)"]);
    }

    #[test]
    fn test_classify_marker() {
        assert_eq!(classify_marker("(APPLAUSE)"), InterjectionCategory::AudienceApplause);
        assert_eq!(classify_marker("(BOOS)"), InterjectionCategory::AudienceBooing);
        assert_eq!(classify_marker("( crosstalk )"), InterjectionCategory::CandidateCrosstalk);
        assert_eq!(classify_marker("(BELL RINGS)"), InterjectionCategory::DebateBell);
        assert_eq!(classify_marker("(SOMETHING ODD)"), InterjectionCategory::Other);
    }

    #[test]
    fn test_category_table_is_total_over_taxonomy() {
        for category in InterjectionCategory::ALL {
            if category == InterjectionCategory::Other {
                continue;
            }
            assert!(
                INTERJECTION_CATEGORIES.iter().any(|&(_, c)| c == category),
                "{category} has no markers"
            );
        }
    }
}
