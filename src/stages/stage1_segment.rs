use regex::Regex;
use tracing::{debug, warn};

use crate::models::{SpeakerRegistry, Turn};

use super::longest_first_alternation;

/// Configuration for turn segmentation
///
/// Adjacent turns of one canonical speaker are always merged; that is not
/// configurable.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Also drop bracketed `[ ... ]` markup when deriving clean text
    pub strip_markup: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { strip_markup: true }
    }
}

/// Build the delimiter pattern for a set of raw speaker labels
///
/// A delimiter is a label directly followed by a colon and any run of spaces
/// or tabs. Longer labels are tried first so that no label shadows a longer
/// one it prefixes.
pub fn build_delimiter_pattern<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<Regex> {
    let alternation = longest_first_alternation(labels)?;
    match Regex::new(&format!("({}):[ \\t]*", alternation)) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!("Could not build speaker delimiter pattern: {}", e);
            None
        }
    }
}

/// Perform Stage 1: turn segmentation
///
/// Splits the transcript on the registry's raw labels. Each label opens a turn
/// holding the text up to the next label. Text before the first label belongs
/// to nobody and is dropped. A label resolving to the same canonical speaker
/// as the turn before it extends that turn instead of opening a new one.
pub fn segment_turns(text: &str, registry: &SpeakerRegistry) -> Vec<Turn> {
    let Some(pattern) = build_delimiter_pattern(registry.labels()) else {
        return Vec::new();
    };

    let delimiters: Vec<(String, usize, usize)> = pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?;
            Some((label.as_str().to_string(), whole.start(), whole.end()))
        })
        .collect();

    let mut turns: Vec<Turn> = Vec::new();

    for (i, (label, _, body_start)) in delimiters.iter().enumerate() {
        let body_end = delimiters
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());
        let body = &text[*body_start..body_end];

        let Some(speaker) = registry.for_label(label) else {
            continue;
        };

        if let Some(last) = turns.last_mut() {
            if last.speaker == speaker.name {
                last.text.push_str(body);
                if !last.labels.contains(label) {
                    last.labels.push(label.clone());
                }
                continue;
            }
        }

        let position = turns.last().map(|t| t.position).unwrap_or(0) + 1;
        turns.push(Turn {
            position,
            speaker: speaker.name.clone(),
            labels: vec![label.clone()],
            text: body.to_string(),
        });
    }

    debug!(
        "Stage 1: {} delimiters produced {} turns",
        delimiters.len(),
        turns.len()
    );

    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_speakers;

    fn turns_for(labels: &[&str], text: &str) -> Vec<Turn> {
        let registry = normalize_speakers(labels);
        segment_turns(text, &registry)
    }

    #[test]
    fn test_alternating_speakers() {
        let turns = turns_for(&["A", "B"], "A: hi B: bye A: again");

        assert_eq!(turns.len(), 3);
        let summary: Vec<(&str, &str, u32)> = turns
            .iter()
            .map(|t| (t.speaker.as_str(), t.text.as_str(), t.position))
            .collect();
        assert_eq!(summary, vec![("A", "hi ", 1), ("B", "bye ", 2), ("A", "again", 3)]);
    }

    #[test]
    fn test_adjacent_same_speaker_merges() {
        let turns = turns_for(&["A"], "A: hi A: there");

        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "hi there");
        assert_eq!(turns[0].position, 1);
    }

    #[test]
    fn test_aliases_of_one_speaker_merge() {
        let turns = turns_for(
            &["TRUMP", "TRUMO", "KELLY"],
            "KELLY: Question.\nTRUMP: First part.\nTRUMO: second part.\nKELLY: Thanks.",
        );

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker, "TRUMP");
        assert_eq!(turns[1].text, "First part.\nsecond part.\n");
        assert_eq!(turns[1].labels, vec!["TRUMP", "TRUMO"]);
        assert_eq!(turns[2].position, 3);
    }

    #[test]
    fn test_repeated_label_runs_collapse() {
        let turns = turns_for(&["A", "B"], "A: one A: two A: three B: four");

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "one two three ");
        assert_eq!(turns[0].labels, vec!["A"]);
        assert_eq!(turns[1].position, 2);
    }

    #[test]
    fn test_preamble_is_discarded() {
        let turns = turns_for(&["A"], "Transcript courtesy of somebody.\nA: hello");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "hello");
    }

    #[test]
    fn test_longer_label_wins() {
        let turns = turns_for(&["BUSH", "JEB BUSH"], "JEB BUSH: Hello. BUSH: Again.");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, "JEB BUSH");
        assert_eq!(turns[0].text, "Hello. ");
        assert_eq!(turns[1].speaker, "BUSH");
        assert_eq!(turns[1].text, "Again.");
    }

    #[test]
    fn test_positions_are_contiguous_and_unmerged_neighbours_differ() {
        let turns = turns_for(
            &["A", "B", "C"],
            "A: one A: two B: three C: four C: five A: six B: seven",
        );

        for (i, turn) in turns.iter().enumerate() {
            assert_eq!(turn.position as usize, i + 1);
        }
        for pair in turns.windows(2) {
            assert_ne!(pair[0].speaker, pair[1].speaker);
        }
    }

    #[test]
    fn test_turn_texts_reconstruct_attributed_text() {
        let text = "intro\nA: hi there\nB: (APPLAUSE) bye\nA: again";
        let turns = turns_for(&["A", "B"], text);
        let joined: String = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, "hi there\n(APPLAUSE) bye\nagain");
    }

    #[test]
    fn test_no_labels_no_turns() {
        let turns = turns_for(&[], "just some text");
        assert!(turns.is_empty());
    }
}
