use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the debate metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateMetadata {
    /// Transcript file name; unique across the table
    pub file_name: String,
    /// File name up to the first `.`
    pub debate_name: String,
    /// Ordering of the debate within its party's season
    pub order: u32,
    pub party: String,
    pub friendly_name: Option<String>,
    pub city: String,
    pub state: String,
    pub location: String,
    pub date: NaiveDate,
}

impl DebateMetadata {
    /// Derive the debate name from a transcript file name
    pub fn debate_name_for(file_name: &str) -> String {
        file_name
            .split('.')
            .next()
            .unwrap_or(file_name)
            .to_string()
    }
}
