use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    DebateMetadata, InterjectionCategory, LabelSet, Role, Speaker, TurnInterjectionCounts,
};
use crate::normalize::classify_marker;
use crate::pipeline::{CountedCorpus, CountedTranscript};
use crate::stats::{candidate_totals, speaker_stats, CandidateTotals, SpeakerStats};

/// Machine-readable output for a whole corpus run
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub metadata: ReportMetadata,
    /// Every distinct marker and the category it counts under
    pub interjection_markers: Vec<MarkerEntry>,
    pub transcripts: Vec<TranscriptReport>,
    pub candidate_totals: Vec<CandidateTotals>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub total_transcripts: usize,
    pub total_speakers: usize,
    pub total_turns: usize,
    pub turns_with_interjections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerEntry {
    pub marker: String,
    pub category: InterjectionCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debate: Option<DebateMetadata>,
    pub labels: LabelSet,
    pub speakers: Vec<Speaker>,
    pub turns: Vec<TurnReport>,
    pub interjection_totals: TurnInterjectionCounts,
    pub speaker_stats: Vec<SpeakerStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub position: u32,
    pub speaker: String,
    pub role: Role,
    pub text: String,
    pub clean_text: String,
    /// Absent when the turn has no interjections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interjections: Option<TurnInterjectionCounts>,
}

impl TranscriptReport {
    pub fn from_transcript(transcript: &CountedTranscript) -> Self {
        let turns = transcript
            .turns
            .iter()
            .map(|t| TurnReport {
                position: t.turn.position,
                speaker: t.turn.speaker.clone(),
                role: t.role,
                text: t.turn.text.clone(),
                clean_text: t.clean_text.clone(),
                interjections: t.interjections.clone(),
            })
            .collect();

        Self {
            id: transcript.id.clone(),
            debate: transcript.debate.clone(),
            labels: transcript.labels.clone(),
            speakers: transcript.speakers.clone(),
            turns,
            interjection_totals: transcript.interjection_totals(),
            speaker_stats: speaker_stats(transcript),
        }
    }
}

impl CorpusReport {
    /// Build the report for a finished corpus
    pub fn from_corpus(corpus: &CountedCorpus) -> Self {
        let transcripts: Vec<TranscriptReport> = corpus
            .transcripts
            .iter()
            .map(TranscriptReport::from_transcript)
            .collect();

        let metadata = ReportMetadata {
            total_transcripts: transcripts.len(),
            total_speakers: transcripts.iter().map(|t| t.speakers.len()).sum(),
            total_turns: transcripts.iter().map(|t| t.turns.len()).sum(),
            turns_with_interjections: transcripts
                .iter()
                .flat_map(|t| &t.turns)
                .filter(|t| t.interjections.is_some())
                .count(),
        };

        let interjection_markers = corpus
            .matcher
            .markers()
            .iter()
            .map(|marker| MarkerEntry {
                marker: marker.clone(),
                category: classify_marker(marker),
            })
            .collect();

        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            metadata,
            interjection_markers,
            transcripts,
            candidate_totals: candidate_totals(&corpus.transcripts),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable rendering of parsed transcripts
pub struct HumanTranscript<'a> {
    transcripts: &'a [CountedTranscript],
    wrap_width: usize,
}

impl<'a> HumanTranscript<'a> {
    pub fn new(transcripts: &'a [CountedTranscript], wrap_width: usize) -> Self {
        Self {
            transcripts,
            wrap_width,
        }
    }

    /// Format every transcript, one block per turn
    pub fn format(&self) -> String {
        let mut output = String::new();

        for transcript in self.transcripts {
            let title = transcript
                .debate
                .as_ref()
                .and_then(|d| d.friendly_name.clone())
                .unwrap_or_else(|| transcript.id.clone());
            output.push_str(&format!("=== {} ===\n\n", title));

            for turn in &transcript.turns {
                output.push_str(&format!(
                    "[{}] {} ({}):\n",
                    turn.turn.position, turn.turn.speaker, turn.role
                ));
                output.push_str(&wrap_text(&turn.clean_text, self.wrap_width));
                if let Some(counts) = &turn.interjections {
                    output.push('\n');
                    output.push_str(&format_counts(counts));
                }
                output.push_str("\n\n");
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Non-zero categories as `  + CATEGORY xN` entries
fn format_counts(counts: &TurnInterjectionCounts) -> String {
    counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(category, n)| format!("  + {} x{}", category, n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transcript;
    use crate::pipeline::Corpus;
    use crate::stages::SegmenterConfig;

    fn corpus() -> CountedCorpus {
        let mut corpus = Corpus::new(SegmenterConfig::default());
        corpus.add_transcript(
            &Transcript::new(
                "one.txt",
                "KELLY: Welcome.\nTRUMP: Thanks. (APPLAUSE)\n(APPLAUSE) KELLY: Next.",
            ),
            None,
        );
        corpus.finish()
    }

    #[test]
    fn test_report_from_corpus() {
        let report = CorpusReport::from_corpus(&corpus());

        assert_eq!(report.metadata.total_transcripts, 1);
        assert_eq!(report.metadata.total_speakers, 2);
        assert_eq!(report.metadata.total_turns, 3);
        assert_eq!(report.metadata.turns_with_interjections, 1);
        assert_eq!(report.interjection_markers.len(), 1);
        assert_eq!(
            report.interjection_markers[0].category,
            InterjectionCategory::AudienceApplause
        );
        assert_eq!(report.candidate_totals[0].candidate, "TRUMP");
    }

    #[test]
    fn test_turn_without_interjections_omits_counts() {
        let report = CorpusReport::from_corpus(&corpus());
        let value = serde_json::to_value(&report).unwrap();
        let turns = value["transcripts"][0]["turns"].as_array().unwrap();

        assert!(turns[0].get("interjections").is_none());
        assert_eq!(turns[1]["interjections"]["AUDIENCE_APPLAUSE"], 2);
        assert_eq!(turns[1]["role"], "CANDIDATE");

        let stats = value["transcripts"][0]["speaker_stats"].as_array().unwrap();
        let trump = stats.iter().find(|s| s["speaker"] == "TRUMP").unwrap();
        assert_eq!(trump["frequency"]["thanks"], 1);
    }

    #[test]
    fn test_write_json_and_human() {
        let corpus = corpus();
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("report.json");
        CorpusReport::from_corpus(&corpus).write_json(&json_path).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written["metadata"]["total_turns"], 3);

        let text_path = dir.path().join("report.txt");
        HumanTranscript::new(&corpus.transcripts, 80)
            .write_file(&text_path)
            .unwrap();
        let text = std::fs::read_to_string(&text_path).unwrap();
        assert!(text.starts_with("=== one.txt ==="));
        assert!(text.contains("[2] TRUMP (CANDIDATE):\nThanks.\n  + AUDIENCE_APPLAUSE x2"));
    }

    #[test]
    fn test_wrap_text_counts_characters() {
        // 12 characters, 24 bytes
        let text = "Señor moderator éééééééééééé gracias";
        let wrapped = wrap_text(text, 20);

        assert_eq!(
            wrapped.lines().collect::<Vec<_>>(),
            vec!["Señor moderator", "éééééééééééé gracias"]
        );
    }

    #[test]
    fn test_long_turn_is_wrapped_in_human_view() {
        let mut corpus = Corpus::new(SegmenterConfig::default());
        corpus.add_transcript(
            &Transcript::new(
                "two.txt",
                "RAMOS: ¿Qué opina usted sobre la inmigración y la reforma migratoria?\nRUBIO: Gracias.",
            ),
            None,
        );
        let corpus = corpus.finish();
        let text = HumanTranscript::new(&corpus.transcripts, 22).format();

        assert!(text.contains(
            "[1] RAMOS (MODERATOR):\n¿Qué opina usted sobre\nla inmigración y la\nreforma migratoria?\n\n"
        ));
        assert!(text.contains("[2] RUBIO (CANDIDATE):\nGracias.\n\n"));
    }
}
