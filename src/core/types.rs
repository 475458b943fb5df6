use serde::{Deserialize, Serialize};

/// Orientation of a feature relative to the reference sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    /// Read directly from the reference (`+`)
    Forward,
    /// Reverse-complemented before use (`-`)
    Reverse,
}

impl Strand {
    /// GFF3 strand marker for this orientation
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The extracted subsequence for one feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub seqid: String,
    pub sequence: String,
}

impl ExtractionResult {
    pub fn new(seqid: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            seqid: seqid.into(),
            sequence: sequence.into(),
        }
    }

    /// Render as a `seqid<TAB>sequence` row
    #[must_use]
    pub fn to_row(&self) -> String {
        format!("{}\t{}", self.seqid, self.sequence)
    }
}

/// How to treat a strand column that is neither `+` nor `-`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrandHandling {
    /// Anything other than `+` is read as the reverse strand
    #[default]
    Lenient,
    /// Only `+` and `-` are accepted
    Strict,
}

/// How to treat a feature whose seqid is missing from the genome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MissingSeqidHandling {
    /// Extract from an empty sequence, yielding an empty result
    #[default]
    Lenient,
    /// Fail the run with an error naming the seqid
    Strict,
}

/// How to complement characters outside `A`, `T`, `G`, `C`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NucleotideHandling {
    /// Emit `G` for any character that is not `A`, `T` or `G`
    #[default]
    Fallback,
    /// Keep the character unchanged
    Preserve,
    /// Fail on the first unsupported character
    Strict,
}
