use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed taxonomy of non-speech markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterjectionCategory {
    AudienceApplause,
    AudienceBooing,
    AudienceLaughter,
    AudienceMixed,
    CandidateCrosstalk,
    CandidateSpanish,
    CandidateStalling,
    DebateBell,
    Media,
    Unintelligible,
    Other,
}

impl InterjectionCategory {
    pub const ALL: [InterjectionCategory; 11] = [
        InterjectionCategory::AudienceApplause,
        InterjectionCategory::AudienceBooing,
        InterjectionCategory::AudienceLaughter,
        InterjectionCategory::AudienceMixed,
        InterjectionCategory::CandidateCrosstalk,
        InterjectionCategory::CandidateSpanish,
        InterjectionCategory::CandidateStalling,
        InterjectionCategory::DebateBell,
        InterjectionCategory::Media,
        InterjectionCategory::Unintelligible,
        InterjectionCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterjectionCategory::AudienceApplause => "AUDIENCE_APPLAUSE",
            InterjectionCategory::AudienceBooing => "AUDIENCE_BOOING",
            InterjectionCategory::AudienceLaughter => "AUDIENCE_LAUGHTER",
            InterjectionCategory::AudienceMixed => "AUDIENCE_MIXED",
            InterjectionCategory::CandidateCrosstalk => "CANDIDATE_CROSSTALK",
            InterjectionCategory::CandidateSpanish => "CANDIDATE_SPANISH",
            InterjectionCategory::CandidateStalling => "CANDIDATE_STALLING",
            InterjectionCategory::DebateBell => "DEBATE_BELL",
            InterjectionCategory::Media => "MEDIA",
            InterjectionCategory::Unintelligible => "UNINTELLIGIBLE",
            InterjectionCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for InterjectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interjection tallies for one turn; every category is always present
///
/// Deserializing a partial map fills the missing categories with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<InterjectionCategory, u32>",
    into = "BTreeMap<InterjectionCategory, u32>"
)]
pub struct TurnInterjectionCounts {
    counts: BTreeMap<InterjectionCategory, u32>,
}

impl TurnInterjectionCounts {
    /// All eleven categories at zero
    pub fn zeroed() -> Self {
        Self {
            counts: InterjectionCategory::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }

    /// Tally a sequence of categories
    pub fn from_categories(categories: impl IntoIterator<Item = InterjectionCategory>) -> Self {
        let mut counts = Self::zeroed();
        for category in categories {
            counts.increment(category);
        }
        counts
    }

    pub fn increment(&mut self, category: InterjectionCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: InterjectionCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Sum over all categories
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Add another turn's counts into this one
    pub fn absorb(&mut self, other: &TurnInterjectionCounts) {
        for (&category, &count) in &other.counts {
            *self.counts.entry(category).or_insert(0) += count;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InterjectionCategory, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

impl From<BTreeMap<InterjectionCategory, u32>> for TurnInterjectionCounts {
    fn from(partial: BTreeMap<InterjectionCategory, u32>) -> Self {
        let mut counts = Self::zeroed();
        counts.counts.extend(partial);
        counts
    }
}

impl From<TurnInterjectionCounts> for BTreeMap<InterjectionCategory, u32> {
    fn from(counts: TurnInterjectionCounts) -> Self {
        counts.counts
    }
}

impl Default for TurnInterjectionCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}
