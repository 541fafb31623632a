use tracing::debug;

use crate::models::LabelSet;

/// Whether a line prefix reads as a label: some uppercase letters, no lowercase
///
/// Spaces, digits, punctuation and parentheses are all allowed.
pub fn is_label_candidate(prefix: &str) -> bool {
    prefix.chars().any(char::is_uppercase) && !prefix.chars().any(char::is_lowercase)
}

/// Whether a label is an interjection marker rather than a speaker
pub fn is_interjection_label(label: &str) -> bool {
    label.contains('(') || label.contains(')')
}

/// Perform Stage 0: label extraction
///
/// Each line is split on its first colon. The text before it becomes a
/// candidate when it passes [`is_label_candidate`]; candidates are kept once,
/// in first-seen order, and sorted into speakers and interjection markers.
/// Lines without a colon carry no label and are skipped.
pub fn extract_labels(text: &str) -> LabelSet {
    let mut labels = LabelSet::default();

    for line in text.split('\n') {
        let Some((prefix, _)) = line.split_once(':') else {
            continue;
        };
        if !is_label_candidate(prefix) {
            continue;
        }

        let bucket = if is_interjection_label(prefix) {
            &mut labels.interjections
        } else {
            &mut labels.speakers
        };
        if !bucket.iter().any(|l| l == prefix) {
            bucket.push(prefix.to_string());
        }
    }

    debug!(
        "Stage 0: {} speaker labels, {} interjection labels",
        labels.speakers.len(),
        labels.interjections.len()
    );

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_candidates() {
        assert!(is_label_candidate("TRUMP"));
        assert!(is_label_candidate("(APPLAUSE) TRUMP"));
        assert!(is_label_candidate("O'MALLEY"));
        assert!(!is_label_candidate("Trump"));
        assert!(!is_label_candidate("1990"));
        assert!(!is_label_candidate(""));
    }

    #[test]
    fn test_extract_labels() {
        let text = "KELLY: Good evening.\n\
                    TRUMP: Thank you.\n\
                    (APPLAUSE) TRUMP: As I was saying.\n\
                    KELLY: Next question.\n\
                    The time is 9:30 now.\n\
                    (LAUGHTER)\n\
                    MEGYN: Mr. Trump.";

        let labels = extract_labels(text);

        assert_eq!(labels.speakers, vec!["KELLY", "TRUMP", "MEGYN"]);
        assert_eq!(labels.interjections, vec!["(APPLAUSE) TRUMP"]);
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let labels = extract_labels("NO COLON HERE\n\n   \nSTILL NONE");
        assert!(labels.speakers.is_empty());
        assert!(labels.interjections.is_empty());
    }

    #[test]
    fn test_only_first_colon_splits() {
        let labels = extract_labels("BLITZER: At 10:15 we resume.");
        assert_eq!(labels.speakers, vec!["BLITZER"]);
    }
}
