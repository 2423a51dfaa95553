//! Command-line interface for mq-tally.
//!
//! The binary runs as one stage of a larger pipeline: an upstream aligner
//! produces `<PREFIX>.sam`, and downstream coverage/plotting stages consume
//! the two reports written here. All file names derive from the single
//! positional prefix.
//!
//! ## Usage
//!
//! ```text
//! # Summarize run01.sam into run01_MQ.txt and run01_chrLens.txt
//! mq-tally run01
//!
//! # With per-phase progress logging
//! mq-tally run01 --verbose
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::parsing::sam;
use crate::report;

#[derive(Parser)]
#[command(name = "mq-tally")]
#[command(version)]
#[command(about = "Summarize per-species read mapping quality from a SAM file")]
#[command(
    long_about = "mq-tally scans a SAM file of reads aligned to a combination reference genome and reports, for every species and every mapping-quality score 0-60, how many reads landed there and which ones.\n\nSpecies are discovered from the @SQ header records: a sequence id <species>-<index> registers its species when index 1 appears. Reads that map to no target are tallied under the reserved species '*'."
)]
pub struct Cli {
    /// Run prefix: reads <PREFIX>.sam and writes <PREFIX>_MQ.txt and
    /// <PREFIX>_chrLens.txt
    #[arg(required = true)]
    pub prefix: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Input SAM path derived from the prefix.
    #[must_use]
    pub fn sam_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.sam", self.prefix))
    }

    /// Quality-report path derived from the prefix.
    #[must_use]
    pub fn quality_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_MQ.txt", self.prefix))
    }

    /// Lengths-report path derived from the prefix.
    #[must_use]
    pub fn lengths_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_chrLens.txt", self.prefix))
    }
}

/// Execute a run: scan the SAM file, then write both reports.
///
/// The reports are held in memory until the scan has fully succeeded, so a
/// mid-stream failure leaves no partial output files behind.
///
/// # Errors
///
/// Returns an error if the input cannot be scanned or either report cannot
/// be written.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    let sam_path = cli.sam_path();
    let scan = sam::scan_file(&sam_path)
        .with_context(|| format!("failed to scan {}", sam_path.display()))?;

    let lengths_path = cli.lengths_path();
    report::save_lengths_report(&lengths_path, &scan.sequences)
        .with_context(|| format!("failed to write {}", lengths_path.display()))?;

    let quality_path = cli.quality_path();
    report::save_quality_report(&quality_path, &scan.tally)
        .with_context(|| format!("failed to write {}", quality_path.display()))?;

    info!(
        sequences = scan.sequences.len(),
        species = scan.tally.species().len(),
        reads = scan.alignment_records,
        elapsed = ?start.elapsed(),
        "scan complete"
    );

    Ok(())
}
