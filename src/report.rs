//! Serialization of the lengths and mapping-quality reports.
//!
//! Both tables are tab-separated. The lengths report mirrors the header
//! scan (one row per `@SQ` record, no header row); the quality report emits
//! one row per `(species, score)` pair, zero-count pairs included, so its
//! data-row count is always `61 × number of registered species`.

use std::io::{self, Write};
use std::path::Path;

use crate::core::sequence::SequenceRecord;
use crate::core::tally::MqTally;

/// Column header of the quality report.
pub const QUALITY_HEADER: &str = "Species\tMQscore\tcount\tSequenceNames";

/// Write `(sequenceId, length)` rows in input encounter order.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_lengths_report<W: Write>(
    writer: &mut W,
    sequences: &[SequenceRecord],
) -> io::Result<()> {
    for seq in sequences {
        writeln!(writer, "{}\t{}", seq.id, seq.length)?;
    }
    Ok(())
}

/// Write the quality table: species in discovery order, scores ascending,
/// read names comma-joined in encounter order. An empty bucket serializes
/// to an empty names field.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_quality_report<W: Write>(writer: &mut W, tally: &MqTally) -> io::Result<()> {
    writeln!(writer, "{QUALITY_HEADER}")?;
    for (species, score, bucket) in tally.rows() {
        writeln!(
            writer,
            "{species}\t{score}\t{}\t{}",
            bucket.count,
            bucket.read_names.join(",")
        )?;
    }
    Ok(())
}

/// Write the lengths report to a file, buffered.
///
/// # Errors
///
/// Returns `io::Error` if the file cannot be created or written.
pub fn save_lengths_report(path: &Path, sequences: &[SequenceRecord]) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_lengths_report(&mut writer, sequences)?;
    writer.flush()
}

/// Write the quality report to a file, buffered.
///
/// # Errors
///
/// Returns `io::Error` if the file cannot be created or written.
pub fn save_quality_report(path: &Path, tally: &MqTally) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_quality_report(&mut writer, tally)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_report_rows() {
        let sequences = vec![
            SequenceRecord::new("speciesA-1", 500),
            SequenceRecord::new("speciesA-2", 300),
        ];

        let mut out = Vec::new();
        write_lengths_report(&mut out, &sequences).unwrap();

        assert_eq!(out, b"speciesA-1\t500\nspeciesA-2\t300\n");
    }

    #[test]
    fn test_lengths_report_empty() {
        let mut out = Vec::new();
        write_lengths_report(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_quality_report_header_and_row_count() {
        let mut tally = MqTally::new();
        tally.register("speciesA").unwrap();
        tally.register("speciesB").unwrap();

        let mut out = Vec::new();
        write_quality_report(&mut out, &tally).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(QUALITY_HEADER));
        // 61 data rows per species, sentinel included, zero counts and all
        assert_eq!(text.lines().count(), 1 + 61 * 3);
    }

    #[test]
    fn test_quality_report_row_format() {
        let mut tally = MqTally::new();
        tally.register("speciesA").unwrap();
        tally.record("speciesA", 30, "read1").unwrap();
        tally.record("speciesA", 30, "read2").unwrap();

        let mut out = Vec::new();
        write_quality_report(&mut out, &tally).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("speciesA\t30\t2\tread1,read2\n"));
        // Empty buckets serialize with an empty trailing field
        assert!(text.contains("speciesA\t0\t0\t\n"));
        assert!(text.contains("*\t0\t0\t\n"));
    }

    #[test]
    fn test_quality_report_deterministic() {
        let mut tally = MqTally::new();
        tally.register("speciesA").unwrap();
        tally.record("speciesA", 5, "read1").unwrap();

        let mut first = Vec::new();
        write_quality_report(&mut first, &tally).unwrap();
        let mut second = Vec::new();
        write_quality_report(&mut second, &tally).unwrap();

        assert_eq!(first, second);
    }
}
