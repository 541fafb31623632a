use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::Role;
use crate::normalize::{frequency_key, is_stopword};
use crate::pipeline::CountedTranscript;

/// What one speaker said in one transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerStats {
    pub speaker: String,
    pub role: Role,
    pub times_spoken: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub avg_words_per_turn: f64,
    pub first_spoken: u32,
    pub last_spoken: u32,
    /// Lowercased word counts with stopwords removed
    pub frequency: BTreeMap<String, usize>,
}

/// What one candidate said across the corpus
///
/// Word counts here leave out stopwords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTotals {
    pub candidate: String,
    pub debates_present: usize,
    pub times_spoken: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub avg_times_spoken_per_debate: f64,
    pub avg_words_per_time_spoken: f64,
    pub frequency: BTreeMap<String, usize>,
}

/// Words of a text: alphabetic runs, inner apostrophes kept
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '\u{2019}'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '\u{2019}'))
        .filter(|w| !w.is_empty())
}

/// Tally the non-stopword words of a text into `frequency`
pub fn add_frequencies(frequency: &mut BTreeMap<String, usize>, text: &str) {
    for word in words(text).filter(|w| !is_stopword(w)) {
        *frequency.entry(frequency_key(word)).or_insert(0) += 1;
    }
}

/// `numerator / denominator`, zero when there is nothing to divide by
pub fn safe_average(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-speaker statistics for one transcript, in speaker creation order
///
/// Word counts use the clean text of each turn, so interjection markers and
/// markup never count as words.
pub fn speaker_stats(transcript: &CountedTranscript) -> Vec<SpeakerStats> {
    transcript
        .speakers
        .iter()
        .map(|speaker| {
            let turns: Vec<_> = transcript
                .turns
                .iter()
                .filter(|t| t.turn.speaker == speaker.name)
                .collect();

            let mut total_words = 0;
            let mut vocabulary = HashSet::new();
            let mut frequency = BTreeMap::new();
            for turn in &turns {
                for word in words(&turn.clean_text) {
                    total_words += 1;
                    vocabulary.insert(word.to_lowercase());
                }
                add_frequencies(&mut frequency, &turn.clean_text);
            }

            SpeakerStats {
                speaker: speaker.name.clone(),
                role: speaker.role,
                times_spoken: turns.len(),
                total_words,
                unique_words: vocabulary.len(),
                avg_words_per_turn: safe_average(total_words, turns.len()),
                first_spoken: turns.iter().map(|t| t.turn.position).min().unwrap_or(0),
                last_spoken: turns.iter().map(|t| t.turn.position).max().unwrap_or(0),
                frequency,
            }
        })
        .collect()
}

/// Corpus-wide totals for every speaker with the candidate role
pub fn candidate_totals(transcripts: &[CountedTranscript]) -> Vec<CandidateTotals> {
    #[derive(Default)]
    struct Accumulator {
        debates: usize,
        turns: usize,
        frequency: BTreeMap<String, usize>,
    }

    let mut by_candidate: BTreeMap<String, Accumulator> = BTreeMap::new();

    for transcript in transcripts {
        for speaker in transcript.speakers.iter().filter(|s| s.role == Role::Candidate) {
            let entry = by_candidate.entry(speaker.name.clone()).or_default();
            entry.debates += 1;
            for turn in transcript.turns.iter().filter(|t| t.turn.speaker == speaker.name) {
                entry.turns += 1;
                add_frequencies(&mut entry.frequency, &turn.clean_text);
            }
        }
    }

    by_candidate
        .into_iter()
        .map(|(candidate, acc)| {
            let total_words = acc.frequency.values().sum();
            CandidateTotals {
                candidate,
                debates_present: acc.debates,
                times_spoken: acc.turns,
                total_words,
                unique_words: acc.frequency.len(),
                avg_times_spoken_per_debate: safe_average(acc.turns, acc.debates),
                avg_words_per_time_spoken: safe_average(total_words, acc.turns),
                frequency: acc.frequency,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Speaker, Transcript};
    use crate::pipeline::Corpus;
    use crate::stages::SegmenterConfig;

    fn counted(texts: &[(&str, &str)]) -> Vec<CountedTranscript> {
        let mut corpus = Corpus::new(SegmenterConfig::default());
        for (id, text) in texts {
            corpus.add_transcript(&Transcript::new(*id, *text), None);
        }
        corpus.finish().transcripts
    }

    #[test]
    fn test_words() {
        let found: Vec<_> = words("We don't win -- 100% (APPLAUSE) 'quoted'").collect();
        assert_eq!(found, vec!["We", "don't", "win", "APPLAUSE", "quoted"]);
    }

    #[test]
    fn test_safe_average_zero_denominator() {
        assert_eq!(safe_average(10, 0), 0.0);
        assert_eq!(safe_average(9, 2), 4.5);
    }

    #[test]
    fn test_speaker_stats() {
        let transcripts = counted(&[(
            "one.txt",
            "KELLY: Hello there.\nTRUMP: We win, we win.\n(APPLAUSE) TRUMP: x\nKELLY: Next.\nTRUMP: Fine.",
        )]);
        let stats = speaker_stats(&transcripts[0]);

        let trump = stats.iter().find(|s| s.speaker == "TRUMP").unwrap();
        assert_eq!(trump.role, Role::Candidate);
        assert_eq!(trump.times_spoken, 2);
        // "We win, we win." + "x" + "Fine." with the marker stripped
        assert_eq!(trump.total_words, 6);
        assert_eq!(trump.unique_words, 4);
        assert_eq!(trump.avg_words_per_turn, 3.0);
        assert_eq!((trump.first_spoken, trump.last_spoken), (2, 4));
        // "we" is a stopword
        assert_eq!(trump.frequency.get("win"), Some(&2));
        assert_eq!(trump.frequency.get("we"), None);
        assert_eq!(trump.frequency.len(), 3);
    }

    #[test]
    fn test_speaker_with_no_turns_averages_zero() {
        let transcript = CountedTranscript {
            id: "empty.txt".to_string(),
            debate: None,
            labels: Default::default(),
            speakers: vec![Speaker::new("GHOST", Role::Other)],
            turns: Vec::new(),
        };
        let stats = speaker_stats(&transcript);

        assert_eq!(stats[0].times_spoken, 0);
        assert_eq!(stats[0].avg_words_per_turn, 0.0);
        assert_eq!((stats[0].first_spoken, stats[0].last_spoken), (0, 0));
        assert!(stats[0].frequency.is_empty());
    }

    #[test]
    fn test_candidate_totals() {
        let transcripts = counted(&[
            ("one.txt", "KELLY: Go.\nTRUMP: One two.\nCRUZ: Three."),
            ("two.txt", "TAPPER: Go.\nTRUMP: Four five six."),
        ]);
        let totals = candidate_totals(&transcripts);

        assert_eq!(totals.len(), 2);
        let trump = totals.iter().find(|t| t.candidate == "TRUMP").unwrap();
        assert_eq!(trump.debates_present, 2);
        assert_eq!(trump.times_spoken, 2);
        assert_eq!(trump.total_words, 5);
        assert_eq!(trump.avg_times_spoken_per_debate, 1.0);
        assert_eq!(trump.avg_words_per_time_spoken, 2.5);
        assert_eq!(trump.frequency.get("four"), Some(&1));
    }

    #[test]
    fn test_candidate_totals_leave_out_stopwords() {
        let transcripts = counted(&[
            ("one.txt", "KELLY: Go.
TRUMP: We will build the wall."),
            ("two.txt", "TAPPER: Go.
TRUMP: The Wall, and it\u{2019}s a big wall!"),
        ]);
        let totals = candidate_totals(&transcripts);
        let trump = &totals[0];

        assert_eq!(trump.candidate, "TRUMP");
        // build, wall, wall, big, wall
        assert_eq!(trump.total_words, 5);
        assert_eq!(trump.unique_words, 3);
        assert_eq!(trump.frequency.get("wall"), Some(&3));
        assert_eq!(trump.frequency.get("it's"), None);
        assert_eq!(trump.avg_words_per_time_spoken, 2.5);
    }

    #[test]
    fn test_add_frequencies() {
        let mut frequency = BTreeMap::new();
        add_frequencies(&mut frequency, "Jobs, JOBS and more jobs.");
        add_frequencies(&mut frequency, "Taxes?");

        assert_eq!(frequency.get("jobs"), Some(&3));
        assert_eq!(frequency.get("taxes"), Some(&1));
        assert_eq!(frequency.len(), 2);
    }
}
