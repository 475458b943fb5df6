//! Core data types for strand-aware sequence extraction.
//!
//! - [`codec`]: complement, reverse-complement and FASTA record splitting
//! - [`genome`]: [`GenomeIndex`](genome::GenomeIndex), seqid to raw sequence block
//! - [`feature`]: [`FeatureRecord`](feature::FeatureRecord), one annotated feature
//!   and its sequence extraction
//! - [`types`]: [`Strand`](types::Strand), [`ExtractionResult`](types::ExtractionResult)
//!   and the lenient/strict handling policies
//!
//! ## Coordinates
//!
//! Features carry GFF3 coordinates: 1-based with an inclusive end. A feature
//! spanning `start..=end` reads characters `[start - 1, end)` of the flattened
//! sequence.
//!
//! ```
//! use premir_extract::core::feature::FeatureRecord;
//! use premir_extract::core::genome::GenomeIndex;
//! use premir_extract::core::types::Strand;
//!
//! let genome = GenomeIndex::build(">chr1 test\nNNNN\nACGTACGT\n");
//! let feature = FeatureRecord::new("chr1", 2, 4, "ID=mir-1", Strand::Reverse).unwrap();
//! assert_eq!(feature.extract_sequence(&genome), "ACG");
//! ```

pub mod codec;
pub mod feature;
pub mod genome;
pub mod types;
