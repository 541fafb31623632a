use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::models::{Turn, TurnInterjectionCounts};
use crate::normalize::classify_marker;

use super::longest_first_alternation;

/// Bracketed editorial markup such as `[ APPLAUSE ]` or `[crosstalk]`
static MARKUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]").expect("Invalid markup regex"));

/// Corpus-wide matcher over every distinct cleaned interjection marker
///
/// Built once after all transcripts have been scanned, then shared by every
/// turn of every transcript.
#[derive(Debug, Clone)]
pub struct InterjectionMatcher {
    markers: Vec<String>,
    pattern: Option<Regex>,
}

impl InterjectionMatcher {
    /// Build from cleaned markers; duplicates are collapsed
    pub fn new<'a>(markers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut distinct: Vec<String> = Vec::new();
        for marker in markers {
            if !marker.is_empty() && !distinct.iter().any(|m| m == marker) {
                distinct.push(marker.to_string());
            }
        }

        let pattern = longest_first_alternation(distinct.iter().map(String::as_str)).and_then(
            |alternation| match Regex::new(&alternation) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Could not build interjection pattern: {}", e);
                    None
                }
            },
        );

        Self {
            markers: distinct,
            pattern,
        }
    }

    /// Distinct markers in first-seen order
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// All non-overlapping marker occurrences in `text`, left to right
    pub fn find_markers<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.pattern {
            Some(pattern) => pattern.find_iter(text).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Tally marker categories in `text`; `None` when nothing matched
    pub fn count(&self, text: &str) -> Option<TurnInterjectionCounts> {
        let found = self.find_markers(text);
        if found.is_empty() {
            return None;
        }
        Some(TurnInterjectionCounts::from_categories(
            found.into_iter().map(classify_marker),
        ))
    }

    /// Remove markers (and optionally bracketed markup), collapsing whitespace
    pub fn strip(&self, text: &str, strip_markup: bool) -> String {
        let without_markers = match &self.pattern {
            Some(pattern) => pattern.replace_all(text, " "),
            None => text.into(),
        };
        let without_markup = if strip_markup {
            MARKUP_PATTERN.replace_all(&without_markers, " ").into_owned()
        } else {
            without_markers.into_owned()
        };
        without_markup.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Perform Stage 2 for one turn: count its interjections
pub fn count_turn_interjections(
    turn: &Turn,
    matcher: &InterjectionMatcher,
) -> Option<TurnInterjectionCounts> {
    matcher.count(&turn.text)
}
