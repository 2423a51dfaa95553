//! # mq-tally
//!
//! A library for summarizing read mapping quality per species from SAM files
//! aligned to a combination reference genome.
//!
//! When short reads are mapped against a reference built by concatenating the
//! chromosomes of several species, each alignment carries two useful signals:
//! which species' sequence the read landed on, and how confidently the
//! aligner placed it there (the MAPQ score). `mq-tally` folds a whole SAM
//! file into a per-(species, score) table of read counts and read names,
//! along with a chromosome-lengths table for downstream coverage tooling.
//!
//! ## How species are discovered
//!
//! Sequence ids in the combination reference follow the `<species>-<index>`
//! convention. The SAM header is scanned first: every `@SQ` record
//! contributes a lengths row, and a species is registered - with 61 empty
//! score buckets for MAPQ 0-60 - the first time its index-1 chromosome is
//! declared. Reads that map to no target are tallied under the reserved
//! species `*`, which is registered before any input is read.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mq_tally::parsing::sam::scan_file;
//! use mq_tally::report;
//! use std::path::Path;
//!
//! // One pass: index the header, tally every alignment record
//! let scan = scan_file(Path::new("run01.sam")).unwrap();
//!
//! // Serialize the per-(species, score) table
//! let mut out = Vec::new();
//! report::write_quality_report(&mut out, &scan.tally).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: species registry, score buckets, and sequence records
//! - [`parsing`]: the single-pass SAM scan
//! - [`report`]: lengths and quality report serialization
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::sequence::SequenceRecord;
pub use crate::core::tally::{MqBucket, MqTally, TallyError, MAX_MQ_SCORE, UNMAPPED};
pub use crate::parsing::sam::{SamScan, ScanError};
