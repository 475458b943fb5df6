//! Parsers for the tool's text inputs.
//!
//! This module provides:
//!
//! - **GFF3 annotations**: select `pre_miRNA` lines and turn them into
//!   [`FeatureRecord`](crate::core::feature::FeatureRecord)s
//! - **Input files**: read plain or gzip-compressed text into memory
//! - **RNA fold blocks**: convert `>id` / sequence / `structure (energy)`
//!   triples into tab-separated rows
//!
//! ## Example
//!
//! ```
//! use premir_extract::parsing::gff::{parse_annotation_text, AnnotationOptions};
//!
//! let gff = "1\tmirbase\tpre_miRNA\t10\t20\t.\t-\t.\tID=mir-1\n";
//! let features = parse_annotation_text(gff, &AnnotationOptions::default()).unwrap();
//! assert_eq!(features[0].start(), 10);
//! ```
//!
//! ## Annotation Columns
//!
//! | Column | Field | Notes |
//! |--------|-------|-------|
//! | 0 | seqid | Matched exactly against FASTA headers |
//! | 3 | start | 1-based |
//! | 4 | end | 1-based, inclusive |
//! | 6 | strand | `+` forward, anything else reverse unless strict |
//! | 8 | attributes | Kept verbatim |

use thiserror::Error;

pub mod gff;
pub mod input;
pub mod rnafold;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Unrecognized strand marker '{marker}' on line {line}")]
    UnrecognizedStrand { line: usize, marker: String },

    #[error("Too many features: {0} exceeds maximum allowed (1000000)")]
    TooManyFeatures(usize),

    #[error("Input exceeds the {limit} byte limit")]
    InputTooLarge { limit: u64 },
}
