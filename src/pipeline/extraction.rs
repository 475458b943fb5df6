use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::feature::{flatten_block, resolve_block, ExtractError, FeatureRecord};
use crate::core::genome::GenomeIndex;
use crate::core::types::{
    ExtractionResult, MissingSeqidHandling, NucleotideHandling, StrandHandling,
};
use crate::parsing::gff::{parse_annotation_text, AnnotationOptions};
use crate::parsing::input::read_text;
use crate::parsing::ParseError;
use crate::utils::validation::MAX_INPUT_BYTES;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Configuration for an extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Line selection and strand parsing
    pub annotation: AnnotationOptions,
    /// Treatment of features on sequences absent from the genome
    pub missing_seqid: MissingSeqidHandling,
    /// Treatment of non-ACGT characters on reverse-strand features
    pub nucleotides: NucleotideHandling,
    /// Cap on the decoded size of each input file
    pub max_input_bytes: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            annotation: AnnotationOptions::default(),
            missing_seqid: MissingSeqidHandling::default(),
            nucleotides: NucleotideHandling::default(),
            max_input_bytes: MAX_INPUT_BYTES,
        }
    }
}

impl ExtractionConfig {
    /// Every policy strict: unknown strands, seqids and nucleotides all fail
    #[must_use]
    pub fn strict() -> Self {
        Self {
            annotation: AnnotationOptions {
                strand: StrandHandling::Strict,
                ..AnnotationOptions::default()
            },
            missing_seqid: MissingSeqidHandling::Strict,
            nucleotides: NucleotideHandling::Strict,
            ..Self::default()
        }
    }
}

/// Feature count against result count, reported after every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSummary {
    pub expected: usize,
    pub actual: usize,
    pub success: bool,
}

impl std::fmt::Display for CountSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Expected: {} sequences, Actual: {}. Success: {}",
            self.expected,
            self.actual,
            if self.success { "True" } else { "False" }
        )
    }
}

/// Check that every feature produced exactly one result.
///
/// One result is produced per feature, so this only fails if that
/// correspondence is broken.
#[must_use]
pub fn verify_count(features: &[FeatureRecord], results: &[ExtractionResult]) -> bool {
    features.len() == results.len()
}

/// Features and their extracted sequences, in annotation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRun {
    pub features: Vec<FeatureRecord>,
    pub results: Vec<ExtractionResult>,
}

impl ExtractionRun {
    #[must_use]
    pub fn summary(&self) -> CountSummary {
        CountSummary {
            expected: self.features.len(),
            actual: self.results.len(),
            success: verify_count(&self.features, &self.results),
        }
    }

    /// Pair each feature with its result
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureRecord, &ExtractionResult)> {
        self.features.iter().zip(&self.results)
    }
}

/// Joins parsed annotations with the genome index
pub struct ExtractionPipeline {
    config: ExtractionConfig,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl ExtractionPipeline {
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse the annotation, index the genome and extract every feature.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Parse` for annotation errors and
    /// `PipelineError::Extract` when a strict policy rejects a feature.
    pub fn run(
        &self,
        annotation_text: &str,
        fasta_text: &str,
    ) -> Result<ExtractionRun, PipelineError> {
        let features = parse_annotation_text(annotation_text, &self.config.annotation)?;
        let index = GenomeIndex::build(fasta_text);
        let results = self.extract_all(&features, &index)?;

        let run = ExtractionRun { features, results };
        info!(
            features = run.features.len(),
            sequences = index.len(),
            "Extraction complete"
        );
        Ok(run)
    }

    /// Read both inputs (plain or gzipped) and [`run`](Self::run) them.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Parse` if either file cannot be read, or any
    /// error from [`run`](Self::run).
    pub fn run_files(
        &self,
        annotation: &Path,
        fasta: &Path,
    ) -> Result<ExtractionRun, PipelineError> {
        let annotation_text = read_text(annotation, self.config.max_input_bytes)?;
        let fasta_text = read_text(fasta, self.config.max_input_bytes)?;
        self.run(&annotation_text, &fasta_text)
    }

    /// Extract each feature in order.
    ///
    /// Each referenced block is flattened once and reused for later features
    /// on the same seqid.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` when a strict policy rejects a feature.
    pub fn extract_all(
        &self,
        features: &[FeatureRecord],
        index: &GenomeIndex,
    ) -> Result<Vec<ExtractionResult>, ExtractError> {
        let mut flattened: HashMap<&str, String> = HashMap::new();
        let mut results = Vec::with_capacity(features.len());

        for feature in features {
            let seqid = feature.seqid();

            if !flattened.contains_key(seqid) {
                let raw = resolve_block(index, seqid, self.config.missing_seqid)?
                    .unwrap_or_else(|| {
                        warn!(seqid, "Sequence not found in genome, using empty sequence");
                        ""
                    });
                debug!(seqid, "Flattening sequence block");
                flattened.insert(seqid, flatten_block(raw));
            }

            let sequence = feature.extract_from_flattened(
                flattened.get(seqid).map(String::as_str).unwrap_or_default(),
                self.config.nucleotides,
            )?;
            results.push(ExtractionResult::new(seqid, sequence));
        }

        Ok(results)
    }
}
