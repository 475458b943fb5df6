use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::codec::{reverse_complement, reverse_complement_with, CodecError};
use crate::core::genome::GenomeIndex;
use crate::core::types::{MissingSeqidHandling, NucleotideHandling, Strand};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("start must be at least 1 (coordinates are 1-based)")]
    ZeroStart,

    #[error("end {end} is before start {start}")]
    EndBeforeStart { start: u64, end: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Sequence '{seqid}' not found in genome")]
    UnknownSeqid { seqid: String },

    #[error("Cannot reverse-complement {seqid}:{start}-{end}: {source}")]
    Nucleotide {
        seqid: String,
        start: u64,
        end: u64,
        #[source]
        source: CodecError,
    },
}

/// A strand-tagged annotation entry
///
/// Coordinates are 1-based and inclusive, as written in GFF3. Deserializing
/// goes through [`FeatureRecord::new`], so the same checks apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureRecord")]
pub struct FeatureRecord {
    seqid: String,
    start: u64,
    end: u64,
    /// Column 8 of the annotation line, verbatim
    transcript: String,
    strand: Strand,
}

#[derive(Deserialize)]
struct RawFeatureRecord {
    seqid: String,
    start: u64,
    end: u64,
    transcript: String,
    strand: Strand,
}

impl TryFrom<RawFeatureRecord> for FeatureRecord {
    type Error = CoordinateError;

    fn try_from(raw: RawFeatureRecord) -> Result<Self, Self::Error> {
        Self::new(raw.seqid, raw.start, raw.end, raw.transcript, raw.strand)
    }
}

/// Resolve a seqid to its raw block under the given policy.
///
/// # Errors
///
/// Returns `ExtractError::UnknownSeqid` if the seqid is missing and `missing`
/// is strict. A lenient miss resolves to `None`.
pub fn resolve_block<'a>(
    index: &'a GenomeIndex,
    seqid: &str,
    missing: MissingSeqidHandling,
) -> Result<Option<&'a str>, ExtractError> {
    match (index.lookup(seqid), missing) {
        (Some(raw), _) => Ok(Some(raw)),
        (None, MissingSeqidHandling::Lenient) => Ok(None),
        (None, MissingSeqidHandling::Strict) => Err(ExtractError::UnknownSeqid {
            seqid: seqid.to_string(),
        }),
    }
}

impl FeatureRecord {
    /// # Errors
    ///
    /// Returns `CoordinateError` if `start` is 0 or `end` is before `start`.
    pub fn new(
        seqid: impl Into<String>,
        start: u64,
        end: u64,
        transcript: impl Into<String>,
        strand: Strand,
    ) -> Result<Self, CoordinateError> {
        if start == 0 {
            return Err(CoordinateError::ZeroStart);
        }
        if end < start {
            return Err(CoordinateError::EndBeforeStart { start, end });
        }

        Ok(Self {
            seqid: seqid.into(),
            start,
            end,
            transcript: transcript.into(),
            strand,
        })
    }

    #[must_use]
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Number of bases spanned by the feature
    #[must_use]
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Extract this feature's sequence from the genome.
    ///
    /// An unknown seqid reads as an empty sequence and characters outside the
    /// alphabet complement to `G`. Use [`Self::extract_sequence_with`] to make
    /// either case an error.
    #[must_use]
    pub fn extract_sequence(&self, index: &GenomeIndex) -> String {
        let flattened = flatten_block(index.lookup(&self.seqid).unwrap_or_default());
        let region = self.slice(&flattened);

        match self.strand {
            Strand::Forward => region.to_string(),
            Strand::Reverse => reverse_complement(region),
        }
    }

    /// Extract this feature's sequence with explicit policies.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::UnknownSeqid` if the seqid is missing and
    /// `missing` is strict, or `ExtractError::Nucleotide` if a reverse-strand
    /// region contains a character the `nucleotides` policy rejects.
    pub fn extract_sequence_with(
        &self,
        index: &GenomeIndex,
        missing: MissingSeqidHandling,
        nucleotides: NucleotideHandling,
    ) -> Result<String, ExtractError> {
        let raw = resolve_block(index, &self.seqid, missing)?.unwrap_or_default();
        self.extract_from_flattened(&flatten_block(raw), nucleotides)
    }

    /// Slice and orient an already flattened sequence.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Nucleotide` if the region is on the reverse
    /// strand and contains a character the policy rejects.
    pub fn extract_from_flattened(
        &self,
        flattened: &str,
        nucleotides: NucleotideHandling,
    ) -> Result<String, ExtractError> {
        let region = self.slice(flattened);

        match self.strand {
            Strand::Forward => Ok(region.to_string()),
            Strand::Reverse => {
                reverse_complement_with(region, nucleotides).map_err(|source| {
                    ExtractError::Nucleotide {
                        seqid: self.seqid.clone(),
                        start: self.start,
                        end: self.end,
                        source,
                    }
                })
            }
        }
    }

    /// Characters `[start - 1, end)` of `sequence`, truncated at its end
    fn slice<'a>(&self, sequence: &'a str) -> &'a str {
        let to = usize::try_from(self.end).unwrap_or(usize::MAX);
        let from = usize::try_from(self.start.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .min(to);

        if sequence.is_ascii() {
            let len = sequence.len();
            return &sequence[from.min(len)..to.min(len)];
        }

        // Map character offsets onto byte offsets for non-ASCII input
        let byte_at = |n: usize| {
            sequence
                .char_indices()
                .nth(n)
                .map_or(sequence.len(), |(i, _)| i)
        };
        &sequence[byte_at(from)..byte_at(to)]
    }
}

/// Join the lines of a raw sequence block, dropping the first line.
///
/// `"AAAA\nCCCC\n"` flattens to `"CCCC"`.
// FIXME: the first dropped line is sequence, not a header, once the header
// has been split off by the index; kept until the intended layout is confirmed.
#[must_use]
pub fn flatten_block(raw: &str) -> String {
    raw.lines().skip(1).collect()
}
