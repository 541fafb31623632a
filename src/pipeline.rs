use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{
    DebateMetadata, LabelSet, Role, Speaker, SpeakerRegistry, Transcript, Turn,
    TurnInterjectionCounts,
};
use crate::normalize::{clean_markers, normalize_speakers};
use crate::stages::{
    count_turn_interjections, extract_labels, segment_turns, InterjectionMatcher, SegmenterConfig,
};

/// A transcript after the first pass: labels, speakers, turns and markers
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    pub id: String,
    pub debate: Option<DebateMetadata>,
    pub labels: LabelSet,
    pub speakers: SpeakerRegistry,
    pub turns: Vec<Turn>,
    /// Cleaned interjection markers, in order, duplicates retained
    pub markers: Vec<String>,
}

/// First pass for one transcript
///
/// 1. Extract speaker labels and interjection markers
/// 2. Normalize speaker labels into canonical speakers
/// 3. Segment the text into turns
/// 4. Clean and split the interjection markers
pub fn parse_transcript(transcript: &Transcript, debate: Option<DebateMetadata>) -> ParsedTranscript {
    let labels = extract_labels(&transcript.text);
    let speakers = normalize_speakers(&labels.speakers);
    let turns = segment_turns(&transcript.text, &speakers);
    let markers = clean_markers(&labels.interjections);

    debug!(
        "Parsed {}: {} labels -> {} speakers, {} turns, {} markers",
        transcript.id,
        labels.speakers.len(),
        speakers.len(),
        turns.len(),
        markers.len()
    );

    ParsedTranscript {
        id: transcript.id.clone(),
        debate,
        labels,
        speakers,
        turns,
        markers,
    }
}

/// Outcome of adding a transcript to a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The identifier was already present; the transcript was skipped
    AlreadyExists,
}

/// Collects parsed transcripts until every interjection marker is known
#[derive(Debug, Default)]
pub struct Corpus {
    config: SegmenterConfig,
    transcripts: Vec<ParsedTranscript>,
    ids: HashSet<String>,
}

impl Corpus {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            transcripts: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Run the first pass on a transcript and keep the result
    pub fn add_transcript(
        &mut self,
        transcript: &Transcript,
        debate: Option<DebateMetadata>,
    ) -> AddOutcome {
        if self.ids.contains(&transcript.id) {
            info!("Transcript {} already exists, skipping", transcript.id);
            return AddOutcome::AlreadyExists;
        }

        let parsed = parse_transcript(transcript, debate);
        self.ids.insert(parsed.id.clone());
        self.transcripts.push(parsed);
        AddOutcome::Added
    }

    pub fn transcripts(&self) -> &[ParsedTranscript] {
        &self.transcripts
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Every cleaned marker across the corpus, first-seen order, duplicates kept
    pub fn interjection_markers(&self) -> impl Iterator<Item = &str> {
        self.transcripts
            .iter()
            .flat_map(|t| t.markers.iter().map(String::as_str))
    }

    /// Second pass: count interjections and derive clean text for every turn
    pub fn finish(self) -> CountedCorpus {
        let matcher = InterjectionMatcher::new(self.interjection_markers());
        info!(
            "Counting interjections with {} distinct markers across {} transcripts",
            matcher.markers().len(),
            self.transcripts.len()
        );

        let strip_markup = self.config.strip_markup;
        let transcripts = self
            .transcripts
            .into_iter()
            .map(|parsed| count_transcript(parsed, &matcher, strip_markup))
            .collect();

        CountedCorpus {
            matcher,
            transcripts,
        }
    }
}

/// A turn with its derived clean text and interjection counts
#[derive(Debug, Clone)]
pub struct CountedTurn {
    pub turn: Turn,
    pub role: Role,
    pub clean_text: String,
    /// `None` when the turn has no markers; equivalent to all zero
    pub interjections: Option<TurnInterjectionCounts>,
}

/// A fully processed transcript
#[derive(Debug, Clone)]
pub struct CountedTranscript {
    pub id: String,
    pub debate: Option<DebateMetadata>,
    pub labels: LabelSet,
    pub speakers: Vec<Speaker>,
    pub turns: Vec<CountedTurn>,
}

impl CountedTranscript {
    /// Interjection counts summed over all turns
    pub fn interjection_totals(&self) -> TurnInterjectionCounts {
        let mut totals = TurnInterjectionCounts::zeroed();
        for counts in self.turns.iter().filter_map(|t| t.interjections.as_ref()) {
            totals.absorb(counts);
        }
        totals
    }
}

/// Result of the two-pass pipeline
#[derive(Debug, Clone)]
pub struct CountedCorpus {
    pub matcher: InterjectionMatcher,
    pub transcripts: Vec<CountedTranscript>,
}

fn count_transcript(
    parsed: ParsedTranscript,
    matcher: &InterjectionMatcher,
    strip_markup: bool,
) -> CountedTranscript {
    let turns = parsed
        .turns
        .into_iter()
        .map(|turn| {
            let role = parsed
                .speakers
                .get(&turn.speaker)
                .map(|s| s.role)
                .unwrap_or(Role::Other);
            let clean_text = matcher.strip(&turn.text, strip_markup);
            let interjections = count_turn_interjections(&turn, matcher);
            CountedTurn {
                turn,
                role,
                clean_text,
                interjections,
            }
        })
        .collect();

    CountedTranscript {
        id: parsed.id,
        debate: parsed.debate,
        labels: parsed.labels,
        speakers: parsed.speakers.speakers().to_vec(),
        turns,
    }
}
