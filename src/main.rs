use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use debatescribe::{
    candidate_totals, execute_stage3, load_debate_metadata, read_transcript, resolve_transcripts,
    speaker_stats, AddOutcome, Corpus, CountedCorpus, InterjectionCategory, RenderConfig,
    SegmenterConfig,
};

#[derive(Parser)]
#[command(name = "debatescribe")]
#[command(author, version, about = "Debate transcript parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more transcript files into a report
    Parse {
        /// Transcript text files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// Parse every transcript listed in a debate metadata table
    Corpus {
        /// Debate metadata table (comma-delimited, header row)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Directory holding the transcript files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// Print labels, speakers, turns and interjections without writing files
    Analyze {
        /// Transcript text file
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(clap::Args)]
struct ParseOptions {
    /// Keep bracketed [ ... ] markup in clean text
    #[arg(long)]
    keep_markup: bool,

    /// Line width of the human-readable transcript
    #[arg(long, default_value = "80")]
    wrap_width: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl ParseOptions {
    fn segmenter_config(&self) -> SegmenterConfig {
        SegmenterConfig {
            strip_markup: !self.keep_markup,
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            wrap_width: self.wrap_width,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            human_readable,
            options,
        } => {
            setup_logging(options.verbose);
            parse_files(&input, &output, human_readable.as_deref(), &options)
        }
        Commands::Corpus {
            metadata,
            dir,
            output,
            human_readable,
            options,
        } => {
            setup_logging(options.verbose);
            parse_corpus(&metadata, &dir, &output, human_readable.as_deref(), &options)
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze_transcript(&input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn parse_files(
    inputs: &[PathBuf],
    output: &Path,
    human_readable: Option<&Path>,
    options: &ParseOptions,
) -> Result<()> {
    let mut corpus = Corpus::new(options.segmenter_config());

    // Pass 1: labels, speakers, turns and markers for every transcript
    for path in inputs {
        info!("Loading transcript from {:?}", path);
        let transcript = read_transcript(path).context("Failed to read input transcript")?;
        if corpus.add_transcript(&transcript, None) == AddOutcome::AlreadyExists {
            warn!("{:?} has the same name as an earlier input", path);
        }
    }

    // Pass 2: interjection counts with the corpus-wide marker set
    render(corpus.finish(), output, human_readable, &options.render_config())
}

fn parse_corpus(
    metadata: &Path,
    dir: &Path,
    output: &Path,
    human_readable: Option<&Path>,
    options: &ParseOptions,
) -> Result<()> {
    let debates = load_debate_metadata(metadata).context("Failed to load debate metadata")?;
    let mut corpus = Corpus::new(options.segmenter_config());

    for (path, debate) in resolve_transcripts(dir, &debates) {
        info!("Loading transcript from {:?}", path);
        let transcript = read_transcript(&path)
            .with_context(|| format!("Failed to read transcript for {}", debate.debate_name))?;
        corpus.add_transcript(&transcript, Some(debate));
    }

    render(corpus.finish(), output, human_readable, &options.render_config())
}

fn render(
    corpus: CountedCorpus,
    output: &Path,
    human_readable: Option<&Path>,
    config: &RenderConfig,
) -> Result<()> {
    let result = execute_stage3(&corpus, Some(output), human_readable, config)?;

    info!(
        "Complete: {} transcripts, {} speakers, {} turns ({} with interjections)",
        result.report.metadata.total_transcripts,
        result.report.metadata.total_speakers,
        result.report.metadata.total_turns,
        result.report.metadata.turns_with_interjections
    );
    if let Some(path) = result.machine_path {
        info!("Report written to {:?}", path);
    }
    if let Some(path) = result.human_path {
        info!("Human-readable transcript written to {:?}", path);
    }

    Ok(())
}

fn analyze_transcript(input: &Path) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let transcript = read_transcript(input).context("Failed to read input transcript")?;

    let mut corpus = Corpus::new(SegmenterConfig::default());
    corpus.add_transcript(&transcript, None);
    let corpus = corpus.finish();
    let Some(parsed) = corpus.transcripts.first() else {
        return Ok(());
    };

    println!("Transcript Analysis");
    println!("===================");
    println!("Speaker labels: {:?}", parsed.labels.speakers);
    println!("Interjection labels: {:?}", parsed.labels.interjections);
    println!("Markers: {:?}", corpus.matcher.markers());
    println!("Total turns: {}", parsed.turns.len());
    println!();

    println!("Speakers");
    println!("--------");
    for speaker in &parsed.speakers {
        println!("{} ({}) <- {:?}", speaker.name, speaker.role, speaker.labels);
    }
    println!();

    println!("Interjections");
    println!("-------------");
    let totals = parsed.interjection_totals();
    for category in InterjectionCategory::ALL {
        println!("{}: {}", category, totals.get(category));
    }
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for stats in speaker_stats(parsed) {
        println!(
            "{} ({}): {} turns, {} words, {} unique, avg {:.1} words/turn, first {} last {}",
            stats.speaker,
            stats.role,
            stats.times_spoken,
            stats.total_words,
            stats.unique_words,
            stats.avg_words_per_turn,
            stats.first_spoken,
            stats.last_spoken
        );
        if !stats.frequency.is_empty() {
            println!("    top words: {}", top_words(&stats.frequency, 10));
        }
    }

    let candidates = candidate_totals(&corpus.transcripts);
    if !candidates.is_empty() {
        println!();
        println!("Candidates");
        println!("----------");
        for c in candidates {
            println!(
                "{}: {} turns, {} words, avg {:.1} words/turn",
                c.candidate, c.times_spoken, c.total_words, c.avg_words_per_time_spoken
            );
            if !c.frequency.is_empty() {
                println!("    top words: {}", top_words(&c.frequency, 10));
            }
        }
    }

    Ok(())
}

/// The `limit` most frequent words as `word (n)`, most frequent first
fn top_words(frequency: &BTreeMap<String, usize>, limit: usize) -> String {
    let mut ranked: Vec<_> = frequency.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, n)| format!("{} ({})", word, n))
        .collect::<Vec<_>>()
        .join(", ")
}
