use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::MetadataError;
use crate::models::{DebateMetadata, Transcript};

/// Column order of the debate metadata table
pub const METADATA_COLUMNS: [&str; 8] = [
    "Party",
    "Order",
    "File",
    "Friendly Name",
    "City",
    "State",
    "Location",
    "Date",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Read a transcript file; the file name becomes the transcript id
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_transcript(path: &Path) -> Result<Transcript> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("{:?} is not valid UTF-8, replacing invalid bytes", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Transcript::new(id, text))
}

/// Load the debate metadata table from a file
pub fn load_debate_metadata(path: &Path) -> Result<Vec<DebateMetadata>, MetadataError> {
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let debates = parse_debate_metadata(&content)?;
    info!("Loaded {} debates from {:?}", debates.len(), path);
    Ok(debates)
}

/// Parse the debate metadata table
///
/// The first record is a header and must have the expected column count.
/// Quoted fields may span lines. Empty lines are ignored. Any malformed row
/// or repeated file name aborts the whole load.
pub fn parse_debate_metadata(content: &str) -> Result<Vec<DebateMetadata>, MetadataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(metadata_error)?;
    if headers.len() != METADATA_COLUMNS.len() {
        return Err(MetadataError::MalformedRow {
            row: 1,
            expected: METADATA_COLUMNS.len(),
            found: headers.len(),
        });
    }

    let mut debates = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result.map_err(metadata_error)?;
        let row = record.position().map_or(0, |pos| pos.line() as usize);
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        let order = field(1)
            .parse::<u32>()
            .map_err(|_| MetadataError::InvalidOrder { row, value: field(1) })?;
        let date = parse_date(&field(7)).ok_or_else(|| MetadataError::InvalidDate {
            row,
            value: field(7),
        })?;

        let file_name = field(2);
        if !seen.insert(file_name.clone()) {
            return Err(MetadataError::DuplicateDebate(file_name));
        }

        debates.push(DebateMetadata {
            debate_name: DebateMetadata::debate_name_for(&file_name),
            file_name,
            order,
            party: field(0),
            friendly_name: Some(field(3)).filter(|name| !name.is_empty()),
            city: field(4),
            state: field(5),
            location: field(6),
            date,
        });
    }

    Ok(debates)
}

/// Pair each debate with its transcript path under `dir`
pub fn resolve_transcripts(dir: &Path, debates: &[DebateMetadata]) -> Vec<(PathBuf, DebateMetadata)> {
    debates
        .iter()
        .map(|debate| (dir.join(&debate.file_name), debate.clone()))
        .collect()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// A row whose width differs from the header is reported as malformed
fn metadata_error(err: csv::Error) -> MetadataError {
    if let csv::ErrorKind::UnequalLengths { pos, len, .. } = err.kind() {
        return MetadataError::MalformedRow {
            row: pos.as_ref().map_or(0, |pos| pos.line() as usize),
            expected: METADATA_COLUMNS.len(),
            found: *len as usize,
        };
    }
    MetadataError::Csv(err)
}
