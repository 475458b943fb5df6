//! Command-line interface for premir-extract.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **extract**: Extract precursor miRNA sequences from a GFF3 annotation and a FASTA genome
//! - **convert**: Convert RNA fold output (id, sequence, structure with energy) to TSV
//!
//! ## Usage
//!
//! ```text
//! # Extract sequences, gzip input is detected from the extension
//! premir-extract extract input.gff3.gz input.fa.gz
//!
//! # Fail instead of falling back on odd strands, missing contigs or bases
//! premir-extract extract input.gff3 input.fa --strict
//!
//! # FASTA output for folding
//! premir-extract extract input.gff3 input.fa --format fasta -o precursors.fa
//!
//! # Fold output to TSV
//! premir-extract convert rna.nsv.gz -o rna.tsv
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

pub mod convert;
pub mod extract;

#[derive(Parser)]
#[command(name = "premir-extract")]
#[command(version)]
#[command(about = "Extract strand-aware precursor miRNA sequences from GFF3 and FASTA files")]
#[command(
    long_about = "premir-extract reads a GFF3 annotation and a FASTA genome, selects every pre_miRNA feature and writes its sequence.\n\nFeatures on the reverse strand are reverse-complemented. Both inputs may be gzip-compressed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract precursor sequences for annotated features
    Extract(extract::ExtractArgs),

    /// Convert RNA fold blocks to tab-separated rows
    Convert(convert::ConvertArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Tsv,
    Json,
    Fasta,
}

/// Open `path` for buffered writing, or stdout when no path is given
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
