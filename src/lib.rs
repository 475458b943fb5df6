//! # premir-extract
//!
//! A library for extracting precursor miRNA sequences from a genome.
//!
//! Given a GFF3-style annotation and a FASTA genome, every `pre_miRNA` feature
//! is located on its chromosome or contig and cut out using the annotation's
//! 1-based, inclusive coordinates. Features on the reverse strand are
//! reverse-complemented so that every sequence reads 5' to 3'.
//!
//! ## Features
//!
//! - **Strand-aware extraction**: forward features are copied, reverse
//!   features are reverse-complemented
//! - **Lenient by default**: unknown strands, missing sequences and
//!   non-ACGT characters follow fixed fallbacks, each switchable to a strict
//!   error
//! - **Compressed input**: `.gz` annotation and genome files are read directly
//! - **Fold conversion**: RNA secondary-structure output to tab-separated rows
//!
//! ## Example
//!
//! ```
//! use premir_extract::ExtractionPipeline;
//!
//! let gff = "1\tmirbase\tpre_miRNA\t1\t4\t.\t+\t.\tID=MI1\n\
//!            1\tmirbase\tpre_miRNA\t1\t4\t.\t-\t.\tID=MI2\n";
//! let fasta = ">1 desc\nAAAA\nCCCC\n";
//!
//! let run = ExtractionPipeline::default().run(gff, fasta).unwrap();
//! assert_eq!(run.results[0].sequence, "CCCC");
//! assert_eq!(run.results[1].sequence, "GGGG");
//! assert_eq!(
//!     run.summary().to_string(),
//!     "Expected: 2 sequences, Actual: 2. Success: True"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence codec, genome index and feature records
//! - [`parsing`]: Parsers for GFF3 annotations, input files and fold output
//! - [`pipeline`]: The extraction pipeline and its configuration
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::feature::FeatureRecord;
pub use crate::core::genome::GenomeIndex;
pub use crate::core::types::*;
pub use crate::pipeline::extraction::{ExtractionConfig, ExtractionPipeline, ExtractionRun};
