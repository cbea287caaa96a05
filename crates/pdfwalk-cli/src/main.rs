//! pdfwalk - Walk PDF object graphs and print an annotated trail
//!
//! This tool parses PDF files, walks the object graph from the trailer (or
//! an explicit object coordinate), and prints a trail of visited nodes once
//! the sentinel label has been observed.

mod model;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use model::LopdfModel;
use pdfwalk_core::{
    indented, ObjectRef, ReferencePolicy, RootSelector, TrailBuffer, UnknownPolicy, Walker,
    WalkerConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Walk PDF object graphs and print an annotated trail
#[derive(Parser, Debug)]
#[command(name = "pdfwalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Root object coordinate as `num,gen` (default: the document trailer)
    #[arg(short, long)]
    root: Option<ObjectRef>,

    /// Label whose first appearance arms trail output
    #[arg(long, default_value = pdfwalk_core::DEFAULT_SENTINEL)]
    sentinel: String,

    /// Depth ceiling: nodes deeper than this are never expanded
    #[arg(long, default_value_t = pdfwalk_core::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Indentation marker, repeated once per depth level
    #[arg(long, default_value = "-")]
    marker: String,

    /// How to render value kinds without a proper formatting
    #[arg(long, value_enum, default_value = "lenient")]
    unknown: UnknownMode,

    /// What to do when a reference does not resolve
    #[arg(long, value_enum, default_value = "skip")]
    on_unresolved: UnresolvedMode,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single PDF file to walk
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of PDF files to process
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for the emitted trail
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Marker-indented text lines
    Text,
    /// One JSON record per line with depth and text
    Json,
}

/// Rendering policy for value kinds the formatter does not recognize
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnknownMode {
    /// Fail the walk on an unknown kind
    Strict,
    /// Serialize a best-effort representation
    Lenient,
}

impl From<UnknownMode> for UnknownPolicy {
    fn from(mode: UnknownMode) -> Self {
        match mode {
            UnknownMode::Strict => UnknownPolicy::Strict,
            UnknownMode::Lenient => UnknownPolicy::BestEffort,
        }
    }
}

/// Policy for references the document cannot resolve
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnresolvedMode {
    /// Propagate the error and stop the walk
    Halt,
    /// Abandon the branch and continue with siblings
    Skip,
}

impl From<UnresolvedMode> for ReferencePolicy {
    fn from(mode: UnresolvedMode) -> Self {
        match mode {
            UnresolvedMode::Halt => ReferencePolicy::Halt,
            UnresolvedMode::Skip => ReferencePolicy::SkipBranch,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

/// Process a single PDF file
fn process_single_file(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    walk_file(cli, file)
}

/// Process a directory of PDF files recursively
fn process_directory(cli: &Cli, directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut files_processed = 0;

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_pdf(path) {
            continue;
        }

        debug!("Processing file: {}", path.display());
        println!("=== {} ===", path.display());
        if let Err(e) = walk_file(cli, path) {
            // Log error but continue with other files
            warn!("Error processing {}: {}", path.display(), e);
        }
        files_processed += 1;
    }

    info!("Processed {} files", files_processed);
    Ok(())
}

/// Returns true for paths with a `.pdf` extension
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Parse one file, walk its object graph, and print the trail
fn walk_file(cli: &Cli, path: &Path) -> Result<()> {
    trace!("Reading {}", path.display());
    let data = fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    trace!("Read {} bytes from {}", data.len(), path.display());

    let model = LopdfModel::parse(&data)
        .with_context(|| format!("Failed to parse document: {}", path.display()))?;

    let config = WalkerConfig::new()
        .max_depth(cli.max_depth)
        .sentinel(cli.sentinel.clone())
        .unknown(cli.unknown.into())
        .on_unresolved(cli.on_unresolved.into());
    let walker = Walker::with_config(&model, config);

    let root = match cli.root {
        Some(reference) => RootSelector::Explicit(reference),
        None => RootSelector::DocumentDefault,
    };

    let mut buffer = TrailBuffer::new();
    let summary = walker
        .walk(root, &mut buffer)
        .with_context(|| format!("Walk failed for {}", path.display()))?;

    for line in buffer.lines() {
        match cli.format {
            OutputFormat::Text => println!("{}", indented(&cli.marker, line.depth, &line.text)),
            OutputFormat::Json => println!("{}", serde_json::to_string(line)?),
        }
    }

    info!(
        "{}: {} nodes visited, {} lines emitted, {} branches skipped",
        path.display(),
        summary.visited,
        summary.emitted,
        summary.skipped.len()
    );

    Ok(())
}
