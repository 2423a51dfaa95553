use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::sequence::{species_prefix, split_sequence_id, SequenceRecord};
use crate::core::tally::{MqTally, TallyError, UNMAPPED};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid SAM header: {0}")]
    Header(String),

    #[error("invalid alignment record: {0}")]
    Record(String),

    #[error("sequence id '{id}' is not of the form <species>-<index>")]
    InvalidSequenceId { id: String },

    #[error(transparent)]
    Tally(#[from] TallyError),
}

/// Everything produced by one pass over a SAM stream.
#[derive(Debug)]
pub struct SamScan {
    /// `@SQ` records in encounter order
    pub sequences: Vec<SequenceRecord>,

    /// Per-species mapping-quality tally
    pub tally: MqTally,

    /// Number of alignment records consumed
    pub alignment_records: u64,
}

/// Scan a SAM file from disk.
///
/// # Errors
///
/// Returns `ScanError::Io` if the file cannot be read; otherwise as
/// [`scan_reader`].
pub fn scan_file(path: &Path) -> Result<SamScan, ScanError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;
    scan_reader(reader)
}

/// Scan SAM text from any buffered reader.
///
/// The header is indexed first, establishing the species registry; alignment
/// records are then streamed through the tally one at a time. Input order is
/// preserved everywhere it is observable: lengths rows, species discovery,
/// and read-name lists.
///
/// # Errors
///
/// Returns `ScanError::Header` or `ScanError::Record` when the stream is not
/// well-formed SAM, `ScanError::InvalidSequenceId` when an `@SQ` id does not
/// follow the composite naming scheme, and `ScanError::Tally` when an
/// alignment references an unregistered species or an untracked score.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<SamScan, ScanError> {
    use noodles::sam;

    let mut reader = sam::io::Reader::new(reader);
    let header = reader
        .read_header()
        .map_err(|e| ScanError::Header(e.to_string()))?;

    let mut tally = MqTally::new();
    let sequences = index_header(&header, &mut tally)?;

    debug!(
        sequences = sequences.len(),
        species = tally.species().len(),
        "indexed header"
    );

    let mut alignment_records = 0u64;
    for result in reader.record_bufs(&header) {
        let record = result.map_err(|e| ScanError::Record(e.to_string()))?;

        let read_name = record.name().map_or_else(
            || UNMAPPED.to_string(),
            |name| String::from_utf8_lossy(name).into_owned(),
        );

        let species = match record.reference_sequence_id() {
            Some(id) => {
                let seq = sequences.get(id).ok_or_else(|| {
                    ScanError::Record(format!("reference sequence id {id} out of bounds"))
                })?;
                species_prefix(&seq.id)
            }
            None => UNMAPPED,
        };

        // 255 is the SAM marker for an unavailable score; it has no bucket
        // and is rejected by the tally like any other out-of-range value.
        let score = record.mapping_quality().map_or(255, u8::from);

        tally.record(species, score, &read_name)?;
        alignment_records += 1;
    }

    Ok(SamScan {
        sequences,
        tally,
        alignment_records,
    })
}

/// Index `@SQ` records: collect the lengths rows and register each species
/// when its index-1 chromosome is declared.
fn index_header(
    header: &noodles::sam::Header,
    tally: &mut MqTally,
) -> Result<Vec<SequenceRecord>, ScanError> {
    let mut sequences = Vec::new();

    for (name, map) in header.reference_sequences() {
        let name = name.to_string();
        let length = map.length().get() as u64;

        let (species, index) = split_sequence_id(&name)
            .ok_or_else(|| ScanError::InvalidSequenceId { id: name.clone() })?;

        if index == 1 {
            tally.register(species)?;
        }

        sequences.push(SequenceRecord::new(name, length));
    }

    Ok(sequences)
}
