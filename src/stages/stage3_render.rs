use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{CorpusReport, HumanTranscript};
use crate::pipeline::CountedCorpus;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to generate the JSON report
    pub generate_machine: bool,
    /// Whether to generate the human-readable transcript
    pub generate_human: bool,
    /// Line width for the human-readable transcript
    pub wrap_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
            wrap_width: 80,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct RenderResult {
    pub report: CorpusReport,
    /// Path to the JSON report (if written)
    pub machine_path: Option<PathBuf>,
    /// Path to the human transcript (if written)
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Builds the corpus report and writes whichever of the two views has both
/// an output path and is enabled in `config`.
pub fn execute_stage3(
    corpus: &CountedCorpus,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &RenderConfig,
) -> Result<RenderResult> {
    let report = CorpusReport::from_corpus(corpus);
    let mut machine_path = None;
    let mut human_path = None;

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing report to {:?}", path);
            report.write_json(path)?;
            machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human transcript to {:?}", path);
            HumanTranscript::new(&corpus.transcripts, config.wrap_width).write_file(path)?;
            human_path = Some(path.to_path_buf());
        }
    }

    Ok(RenderResult {
        report,
        machine_path,
        human_path,
    })
}
