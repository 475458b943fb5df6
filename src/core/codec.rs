//! Nucleotide complementation and FASTA record splitting.
//!
//! Everything here is a pure function of its arguments. The plain
//! [`complement`] and [`reverse_complement`] apply the fallback policy
//! (`A->T`, `T->A`, `G->C`, anything else `->G`); the `_with` variants take an
//! explicit [`NucleotideHandling`].

use thiserror::Error;

use crate::core::types::NucleotideHandling;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unsupported nucleotide '{character}' at position {position}")]
    UnsupportedNucleotide { character: char, position: usize },
}

/// Complement a single nucleotide with the fallback policy.
///
/// The decision order matters: `C` reaches the final arm and maps to `G`,
/// as does every character outside the alphabet.
#[must_use]
pub fn complement(nucleotide: char) -> char {
    match nucleotide {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        _ => 'G',
    }
}

/// Complement a single nucleotide under the given policy.
///
/// `position` is only used to describe the failure in strict mode.
///
/// # Errors
///
/// Returns `CodecError::UnsupportedNucleotide` when `handling` is
/// `NucleotideHandling::Strict` and the character is not one of `A`, `T`,
/// `G`, `C`.
pub fn complement_with(
    nucleotide: char,
    position: usize,
    handling: NucleotideHandling,
) -> Result<char, CodecError> {
    match (nucleotide, handling) {
        (_, NucleotideHandling::Fallback) => Ok(complement(nucleotide)),
        ('A', _) => Ok('T'),
        ('T', _) => Ok('A'),
        ('G', _) => Ok('C'),
        ('C', _) => Ok('G'),
        (other, NucleotideHandling::Preserve) => Ok(other),
        (other, NucleotideHandling::Strict) => Err(CodecError::UnsupportedNucleotide {
            character: other,
            position,
        }),
    }
}

/// Reverse a sequence and complement every character with the fallback policy.
#[must_use]
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement).collect()
}

/// Reverse-complement under the given policy.
///
/// Positions in errors are 0-based offsets into the input sequence.
///
/// # Errors
///
/// Returns `CodecError::UnsupportedNucleotide` for the first character that
/// the strict policy rejects.
pub fn reverse_complement_with(
    sequence: &str,
    handling: NucleotideHandling,
) -> Result<String, CodecError> {
    let length = sequence.chars().count();
    sequence
        .chars()
        .rev()
        .enumerate()
        .map(|(i, c)| complement_with(c, length - 1 - i, handling))
        .collect()
}

/// Split a FASTA record body into its header line and the rest.
///
/// Only the first `\n` is consumed; the remainder keeps its line breaks.
/// A record with no line break is all header.
#[must_use]
pub fn split_fasta_record(record: &str) -> (&str, &str) {
    record.split_once('\n').unwrap_or((record, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_alphabet() {
        assert_eq!(complement('A'), 'T');
        assert_eq!(complement('T'), 'A');
        assert_eq!(complement('G'), 'C');
        assert_eq!(complement('C'), 'G');
    }

    #[test]
    fn test_complement_fallback_is_g() {
        assert_eq!(complement('N'), 'G');
        assert_eq!(complement('a'), 'G');
        assert_eq!(complement('-'), 'G');
    }

    #[test]
    fn test_reverse_complement_known_value() {
        assert_eq!(reverse_complement("AATTGGCC"), "GGCCAATT");
        assert_eq!(reverse_complement("CGT"), "ACG");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_reverse_complement_is_involution_over_acgt() {
        for seq in ["A", "ACGT", "GATTACA", "CCCCGGGGAATT", "TGCATGCA"] {
            assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
        }
    }

    #[test]
    fn test_reverse_complement_not_involution_outside_alphabet() {
        // N -> G -> C
        assert_eq!(reverse_complement(&reverse_complement("ANA")), "ACA");
    }

    #[test]
    fn test_complement_with_preserve() {
        assert_eq!(complement_with('N', 0, NucleotideHandling::Preserve), Ok('N'));
        assert_eq!(complement_with('C', 0, NucleotideHandling::Preserve), Ok('G'));
    }

    #[test]
    fn test_reverse_complement_with_strict_reports_position() {
        let err = reverse_complement_with("ACNGT", NucleotideHandling::Strict).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedNucleotide {
                character: 'N',
                position: 2
            }
        );
        assert_eq!(
            reverse_complement_with("AATTGGCC", NucleotideHandling::Strict).unwrap(),
            "GGCCAATT"
        );
    }

    #[test]
    fn test_reverse_complement_with_fallback_matches_plain() {
        let seq = "ACGTNRY";
        assert_eq!(
            reverse_complement_with(seq, NucleotideHandling::Fallback).unwrap(),
            reverse_complement(seq)
        );
    }

    #[test]
    fn test_split_fasta_record() {
        let (header, rest) = split_fasta_record("chr1 some description\nACGT\nACGT\n");
        assert_eq!(header, "chr1 some description");
        assert_eq!(rest, "ACGT\nACGT\n");
    }

    #[test]
    fn test_split_fasta_record_without_newline() {
        assert_eq!(split_fasta_record("chr1"), ("chr1", ""));
    }
}
