use std::collections::HashMap;

use thiserror::Error;

/// Highest mapping-quality score tracked.
pub const MAX_MQ_SCORE: u8 = 60;

/// Number of score buckets allocated per species (scores `0..=MAX_MQ_SCORE`).
pub const MQ_BINS: usize = MAX_MQ_SCORE as usize + 1;

/// Species key for reads that map to no target.
pub const UNMAPPED: &str = "*";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    #[error("species '{species}' is already registered")]
    DuplicateSpecies { species: String },

    #[error("read '{read_name}' maps to unregistered species '{species}'")]
    UnknownSpecies { species: String, read_name: String },

    #[error("read '{read_name}' has mapping quality {score} outside 0..=60")]
    ScoreOutOfRange { score: u8, read_name: String },
}

/// One mapping-quality bucket: how many reads landed on it, and which.
///
/// `count == read_names.len()` holds whenever a scan has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MqBucket {
    pub count: u64,
    pub read_names: Vec<String>,
}

/// Aggregation state for one scan: the ordered species list and the nested
/// species → score → bucket table.
///
/// Species registration is a closed phase driven by the header scan; once
/// alignment records are being tallied, lookups never allocate. The sentinel
/// species [`UNMAPPED`] is registered before any input is read, so unmapped
/// records are tallied rather than rejected.
#[derive(Debug)]
pub struct MqTally {
    /// Species in discovery order, sentinel first
    species: Vec<String>,

    /// Score buckets per registered species, indexed by score
    buckets: HashMap<String, Vec<MqBucket>>,
}

impl MqTally {
    /// Create a tally with the unmapped sentinel pre-registered.
    #[must_use]
    pub fn new() -> Self {
        let mut buckets = HashMap::new();
        buckets.insert(UNMAPPED.to_string(), vec![MqBucket::default(); MQ_BINS]);

        Self {
            species: vec![UNMAPPED.to_string()],
            buckets,
        }
    }

    /// Register a species and allocate its empty score buckets.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::DuplicateSpecies` if the species is already
    /// registered. Re-registration would otherwise discard any tallied
    /// counts, so it is rejected outright.
    pub fn register(&mut self, species: &str) -> Result<(), TallyError> {
        if self.buckets.contains_key(species) {
            return Err(TallyError::DuplicateSpecies {
                species: species.to_string(),
            });
        }

        self.species.push(species.to_string());
        self.buckets
            .insert(species.to_string(), vec![MqBucket::default(); MQ_BINS]);
        Ok(())
    }

    /// Record one read against its `(species, score)` bucket.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::UnknownSpecies` when the species was never
    /// registered, or `TallyError::ScoreOutOfRange` when the score has no
    /// pre-allocated bucket. No bucket is created on demand.
    pub fn record(&mut self, species: &str, score: u8, read_name: &str) -> Result<(), TallyError> {
        let buckets = self
            .buckets
            .get_mut(species)
            .ok_or_else(|| TallyError::UnknownSpecies {
                species: species.to_string(),
                read_name: read_name.to_string(),
            })?;

        let bucket = buckets
            .get_mut(usize::from(score))
            .ok_or_else(|| TallyError::ScoreOutOfRange {
                score,
                read_name: read_name.to_string(),
            })?;

        bucket.count += 1;
        bucket.read_names.push(read_name.to_string());
        Ok(())
    }

    /// Registered species in discovery order, sentinel first.
    #[must_use]
    pub fn species(&self) -> &[String] {
        &self.species
    }

    #[must_use]
    pub fn is_registered(&self, species: &str) -> bool {
        self.buckets.contains_key(species)
    }

    /// Score buckets for one species, indexed by score.
    #[must_use]
    pub fn buckets(&self, species: &str) -> Option<&[MqBucket]> {
        self.buckets.get(species).map(Vec::as_slice)
    }

    /// Iterate `(species, score, bucket)` in report order: species in
    /// discovery order, scores ascending.
    #[allow(clippy::cast_possible_truncation)] // scores are bounded by MQ_BINS
    pub fn rows(&self) -> impl Iterator<Item = (&str, u8, &MqBucket)> {
        self.species.iter().flat_map(|species| {
            self.buckets[species]
                .iter()
                .enumerate()
                .map(move |(score, bucket)| (species.as_str(), score as u8, bucket))
        })
    }

    /// Total reads recorded across every species and score.
    #[must_use]
    pub fn total_reads(&self) -> u64 {
        self.buckets.values().flatten().map(|b| b.count).sum()
    }
}

impl Default for MqTally {
    fn default() -> Self {
        Self::new()
    }
}
