pub mod error;
pub mod io;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod stages;
pub mod stats;

pub use error::MetadataError;
pub use io::{
    load_debate_metadata, parse_debate_metadata, read_transcript, resolve_transcripts,
    CorpusReport, HumanTranscript,
};
pub use models::{
    DebateMetadata, InterjectionCategory, LabelSet, Role, Speaker, SpeakerRegistry, Transcript,
    Turn, TurnInterjectionCounts,
};
pub use normalize::{
    canonical_name, classify_marker, clean_markers, is_stopword, normalize_speakers, role_for,
};
pub use pipeline::{parse_transcript, AddOutcome, Corpus, CountedCorpus, CountedTranscript};
pub use stages::{
    execute_stage3, extract_labels, segment_turns, InterjectionMatcher, RenderConfig,
    SegmenterConfig,
};
pub use stats::{candidate_totals, speaker_stats};
