use serde::{Deserialize, Serialize};

/// Raw text of one debate, keyed by its file/session identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Identifier (normally the source file name)
    pub id: String,
    /// Raw transcript text, never modified by the pipeline
    pub text: String,
}

impl Transcript {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Labels found in a transcript, split by kind, each in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    /// Uppercase line prefixes without parentheses
    pub speakers: Vec<String>,
    /// Uppercase line prefixes containing `(` or `)`
    pub interjections: Vec<String>,
}

/// One contiguous span of speech by one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based position within the transcript
    pub position: u32,
    /// Canonical speaker name
    pub speaker: String,
    /// Raw labels that opened or extended this turn
    pub labels: Vec<String>,
    /// Raw spoken text, interjection markers included
    pub text: String,
}

impl Turn {
    /// Number of whitespace-separated tokens in the raw text
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_token_count() {
        let turn = Turn {
            position: 1,
            speaker: "TRUMP".to_string(),
            labels: vec!["TRUMP".to_string()],
            text: "We will win.  (APPLAUSE)\n".to_string(),
        };
        assert_eq!(turn.token_count(), 4);
    }
}
