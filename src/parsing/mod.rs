//! Parsers for the SAM input stream.
//!
//! A single pass drives both phases of the aggregation:
//!
//! - **Header indexing**: `@SQ` records yield the lengths rows and register
//!   each species the first time its index-1 chromosome is declared.
//! - **Alignment tallying**: every alignment record is classified by species
//!   and mapping-quality score against the registry built by the header pass.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mq_tally::parsing::sam::scan_file;
//! use std::path::Path;
//!
//! let scan = scan_file(Path::new("run01.sam")).unwrap();
//! println!("{} reads over {} species", scan.alignment_records, scan.tally.species().len());
//! ```

pub mod sam;
