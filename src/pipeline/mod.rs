//! Extraction pipeline: annotation features joined with the genome index.
//!
//! [`ExtractionPipeline`](extraction::ExtractionPipeline) parses the
//! annotation, builds a [`GenomeIndex`](crate::core::genome::GenomeIndex)
//! and extracts one sequence per feature, in annotation order. Policies for
//! unknown strands, seqids and nucleotides come from
//! [`ExtractionConfig`](extraction::ExtractionConfig); all default to the
//! lenient behavior.

pub mod extraction;

pub use extraction::{
    verify_count, CountSummary, ExtractionConfig, ExtractionPipeline, ExtractionRun,
    PipelineError,
};
