//! semmap CLI - semantic map inference from polysemy tables
//!
//! This is the command-line entry point for semmap. It orchestrates the
//! full pipeline:
//!
//! 1. Configuration: semmap.toml discovery, command-line overrides
//! 2. Table Parsing: strict TSV parsing into observations
//! 3. Bootstrap Inference: resample / optimize / aggregate, in parallel
//! 4. Finalization: frequency thresholds into the weighted map
//! 5. Rendering: terminal report, optional DOT file for GraphViz
//!
//! Design philosophy:
//! - Fail fast with clear, line-numbered errors on bad input
//! - Warn loudly on anything that silently biases the map (stuck
//!   iterations, out-of-vocabulary edges)
//! - Seeded runs are reproducible byte-for-byte
//! - Verbose mode narrates every stage with timings

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Infer a semantic map from cross-linguistic polysemy data
///
/// semmap reads a tab-separated table of lexical items, bootstrap-resamples
/// the language sample, and per sample greedily grows a concept graph until
/// every attested polysemy set induces a connected subgraph. Edges that
/// survive enough resamples form the final weighted map.
///
/// Examples:
///   semmap isolectic_sets.tsv            # report to stdout
///   semmap data.tsv --dot map.dot        # also write GraphViz output
///   semmap data.tsv -s 42 -i 2000        # seeded run, more iterations
#[derive(Parser, Debug)]
#[command(name = "semmap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Input table of isolectic sets
    ///
    /// Tab-separated, one lexical item per line:
    ///   Language <TAB> lemma <TAB> {SENSE1, SENSE2, ...}
    ///
    /// Blank lines are skipped. Anything else malformed aborts the run
    /// with its line number; a silently truncated table must never
    /// produce a plausible-looking map.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Number of bootstrap iterations [default: 1000]
    ///
    /// More iterations sharpen the edge-frequency estimates at linear
    /// cost. The reference procedure uses 1000.
    #[arg(short = 'i', long)]
    pub iterations: Option<usize>,

    /// Languages drawn per bootstrap sample [default: 12]
    ///
    /// Drawn with replacement, so a sample may repeat a language and
    /// omit others; that variance is what the bootstrap measures.
    #[arg(long, value_name = "K")]
    pub sample_size: Option<usize>,

    /// Minimum frequency for an edge to enter the map [default: 250]
    ///
    /// An edge must be part of the converged graph in at least this many
    /// iterations to survive. Raise it for a sparser, more conservative
    /// map.
    #[arg(long, value_name = "N")]
    pub keep_threshold: Option<u32>,

    /// Frequency above which an edge is flagged important [default: 500]
    #[arg(long, value_name = "N")]
    pub importance_threshold: Option<u32>,

    /// Divisor turning a frequency into a DOT pen width [default: 200]
    #[arg(long, value_name = "NORM")]
    pub weight_norm: Option<f64>,

    /// Master random seed
    ///
    /// Fixes both the bootstrap draws and the optimizer's tie-break
    /// shuffles, making the whole run reproducible. Unseeded runs draw
    /// a seed from entropy and report it in --stats.
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Fail on out-of-vocabulary concepts
    ///
    /// By default, edges touching a concept outside the inventory are
    /// skipped during aggregation and reported on stderr. With this flag
    /// the first such concept aborts the run instead.
    #[arg(long)]
    pub strict_vocabulary: bool,

    /// Write the GraphViz DOT to this file instead of stdout
    ///
    /// Without this flag the DOT block follows the report on stdout.
    /// Render with neato:
    ///   neato -Tpdf map.dot -o map.pdf
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,

    /// Suppress the terminal report
    ///
    /// Useful together with --dot when only the file output is wanted.
    #[arg(long)]
    pub no_report: bool,

    /// Explicit config file
    ///
    /// Overrides the default search (semmap.toml next to the table, then
    /// in the working directory). Unlike discovered configs, an explicit
    /// one that fails to parse is a hard error.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable colored output
    ///
    /// Uses ANSI colors for headings and concept labels. Disable with
    /// --no-color when piping the report to a file.
    #[arg(long, default_value = "true")]
    pub color: bool,

    /// Disable colored output
    ///
    /// Equivalent to --color=false.
    #[arg(long)]
    pub no_color: bool,

    /// Show run statistics
    ///
    /// Appends a block with iteration counts, accepted edges, stuck
    /// iterations, skipped edges, and the seed in use.
    #[arg(long)]
    pub stats: bool,

    /// Verbose output
    ///
    /// Narrates the stages on stderr with timings:
    ///   "Parsed 134 observations"
    ///   "Completed 1000 iterations"
    ///
    /// The report itself still goes to stdout.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = run(&cli)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

/// Merge the three configuration layers: defaults, then the config file,
/// then command-line flags.
fn effective_config(cli: &Cli, file: &semmap::FileConfig) -> semmap::MapConfig {
    let mut config = semmap::MapConfig::default();
    file.apply(&mut config);

    if let Some(n) = cli.iterations {
        config.iterations = n;
    }
    if let Some(k) = cli.sample_size {
        config.sample_size = k;
    }
    if let Some(t) = cli.keep_threshold {
        config.keep_threshold = t;
    }
    if let Some(t) = cli.importance_threshold {
        config.importance_threshold = t;
    }
    if let Some(w) = cli.weight_norm {
        config.weight_norm = w;
    }
    config.strict_vocabulary = cli.strict_vocabulary;
    config.seed = cli.seed;

    config
}

/// Execute the full pipeline, returning what should go to stdout.
///
/// 1. Configuration - file discovery plus CLI overrides
/// 2. Table Parsing - strict TSV into observations
/// 3. Bootstrap Inference - the parallel resample/optimize loop
/// 4. Rendering - report string, optional DOT file
fn run(cli: &Cli) -> Result<String> {
    use semmap::corpus::load_corpus;
    use semmap::{FileConfig, infer_map, render_dot, render_report, render_stats};
    use std::time::Instant;

    let start = Instant::now();
    let use_color = cli.color && !cli.no_color;

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 1: Configuration
    // ══════════════════════════════════════════════════════════════════════════
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_path(path)?,
        None => FileConfig::load(&cli.table),
    };
    let inventory = file_config.inventory()?;
    let config = effective_config(cli, &file_config);

    if cli.verbose {
        eprintln!("🗺️  semmap v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("📂 Table: {}", cli.table.display());
        eprintln!("{}", file_config.display_summary());
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 2: Table Parsing
    // ══════════════════════════════════════════════════════════════════════════
    let corpus = load_corpus(&cli.table)?;

    if cli.verbose {
        let sampled = corpus
            .iter()
            .filter(|o| inventory.languages().contains(&o.language))
            .count();
        eprintln!(
            "✓ Parsed {} observations ({} in the language sample) ({:.2?})",
            corpus.len(),
            sampled,
            start.elapsed()
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 3: Bootstrap Inference
    // ══════════════════════════════════════════════════════════════════════════
    let infer_start = Instant::now();
    let result = infer_map(&corpus, &inventory, &config)?;

    if cli.verbose {
        eprintln!(
            "✓ Completed {} iterations, {} edges accepted ({:.2?})",
            result.stats.iterations,
            result.stats.total_steps,
            infer_start.elapsed()
        );
        if cli.seed.is_none() {
            eprintln!("   Seed: {} (pass -s {0} to reproduce this run)", result.stats.seed);
        }
    }

    if result.stats.stuck_iterations > 0 {
        eprintln!(
            "⚠️  {} of {} iterations could not connect every observation; their partial graphs still count",
            result.stats.stuck_iterations, result.stats.iterations
        );
        for sample in &result.stats.stuck_samples {
            eprintln!("   e.g. {}", sample);
        }
    }
    if result.stats.oov_skipped > 0 {
        eprintln!(
            "⚠️  skipped {} edges outside the concept inventory (labels: {})",
            result.stats.oov_skipped,
            result.stats.oov_samples.join(", ")
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 4: Rendering
    // ══════════════════════════════════════════════════════════════════════════
    let dot_text = render_dot(&result.map);

    let mut output = String::new();
    if !cli.no_report {
        output.push_str(&render_report(&result.map, use_color));
    }

    match &cli.dot {
        Some(path) => {
            std::fs::write(path, &dot_text)
                .with_context(|| format!("writing DOT output to {}", path.display()))?;
            if cli.verbose {
                eprintln!("✓ Wrote DOT output to {}", path.display());
            }
        }
        None => {
            // no file target: the DOT block follows the report, bare when
            // the report is suppressed so it stays pipeable to neato
            if output.is_empty() {
                output.push_str(&dot_text);
            } else {
                output.push_str("\n\nDOT OUTPUT:\n");
                output.push_str(&dot_text);
            }
        }
    }

    if cli.stats {
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(&render_stats(&result.stats));
    }

    if cli.verbose {
        eprintln!("Total time: {:.2?}", start.elapsed());
    }

    Ok(output)
}
