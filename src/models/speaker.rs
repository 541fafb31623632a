use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of a canonical speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Candidate,
    Moderator,
    Audience,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "CANDIDATE",
            Role::Moderator => "MODERATOR",
            Role::Audience => "AUDIENCE",
            Role::Other => "OTHER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical speaker identity within one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Canonical name after alias correction
    pub name: String,
    pub role: Role,
    /// Raw labels that normalized to this speaker, in first-seen order
    pub labels: Vec<String>,
}

impl Speaker {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            labels: Vec::new(),
        }
    }

    /// Record a raw label as provenance for this speaker
    pub fn add_label(&mut self, label: &str) {
        if !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
    }
}

/// Speakers of one transcript, created lazily as labels are resolved
#[derive(Debug, Clone, Default)]
pub struct SpeakerRegistry {
    speakers: Vec<Speaker>,
    by_name: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `label` to the speaker called `name`, creating it on first use
    pub fn register(&mut self, label: &str, name: &str, role: Role) -> &Speaker {
        let index = match self.by_name.get(name) {
            Some(&i) => i,
            None => {
                self.speakers.push(Speaker::new(name, role));
                let i = self.speakers.len() - 1;
                self.by_name.insert(name.to_string(), i);
                i
            }
        };
        self.speakers[index].add_label(label);
        self.by_label.insert(label.to_string(), index);
        &self.speakers[index]
    }

    /// Speaker a raw label resolved to
    pub fn for_label(&self, label: &str) -> Option<&Speaker> {
        self.by_label.get(label).map(|&i| &self.speakers[i])
    }

    /// Speaker by canonical name
    pub fn get(&self, name: &str) -> Option<&Speaker> {
        self.by_name.get(name).map(|&i| &self.speakers[i])
    }

    /// All raw labels known to the registry
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.speakers
            .iter()
            .flat_map(|s| s.labels.iter().map(String::as_str))
    }

    /// Speakers in creation order
    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}
