use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{open_output, OutputFormat};
use crate::core::types::{MissingSeqidHandling, NucleotideHandling, StrandHandling};
use crate::parsing::gff::{AnnotationOptions, DEFAULT_FEATURE_MARKER};
use crate::parsing::input::read_text;
use crate::pipeline::{ExtractionConfig, ExtractionPipeline, ExtractionRun};
use crate::utils::validation::MAX_INPUT_BYTES;

#[derive(Args)]
pub struct ExtractArgs {
    /// GFF3 annotation file (plain or .gz). Use '-' for stdin
    #[arg(required = true)]
    pub annotation: PathBuf,

    /// FASTA genome file (plain or .gz)
    #[arg(required = true)]
    pub genome: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Substring that selects annotation lines
    #[arg(
        long,
        default_value = DEFAULT_FEATURE_MARKER,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub feature_marker: String,

    /// How to read strand markers other than '+' and '-'
    #[arg(long, value_enum, default_value = "lenient")]
    pub strand_handling: StrandHandling,

    /// How to handle features on sequences missing from the genome
    #[arg(long, value_enum, default_value = "lenient")]
    pub missing_seqid_handling: MissingSeqidHandling,

    /// How to complement characters other than A, T, G, C
    #[arg(long, value_enum, default_value = "fallback")]
    pub nucleotide_handling: NucleotideHandling,

    /// Make every handling option strict
    #[arg(long)]
    pub strict: bool,

    /// Maximum decoded size of each input file, in bytes
    #[arg(long, default_value_t = MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,
}

impl ExtractArgs {
    #[must_use]
    pub fn config(&self) -> ExtractionConfig {
        let mut config = if self.strict {
            ExtractionConfig::strict()
        } else {
            ExtractionConfig {
                annotation: AnnotationOptions {
                    strand: self.strand_handling,
                    ..AnnotationOptions::default()
                },
                missing_seqid: self.missing_seqid_handling,
                nucleotides: self.nucleotide_handling,
                ..ExtractionConfig::default()
            }
        };
        config.annotation.feature_marker.clone_from(&self.feature_marker);
        config.max_input_bytes = self.max_input_bytes;
        config
    }
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, a strict policy
/// rejects a feature, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();

    let annotation_text = read_text(&args.annotation, config.max_input_bytes)
        .with_context(|| format!("Failed to read annotation {}", args.annotation.display()))?;
    let fasta_text = read_text(&args.genome, config.max_input_bytes)
        .with_context(|| format!("Failed to read genome {}", args.genome.display()))?;

    let run = ExtractionPipeline::new(config).run(&annotation_text, &fasta_text)?;

    if verbose {
        eprintln!(
            "Extracted {} features from {}",
            run.results.len(),
            args.annotation.display()
        );
    }

    let mut out = open_output(args.output.as_deref())?;
    match format {
        OutputFormat::Text => write_text(&mut out, &run)?,
        OutputFormat::Tsv => write_tsv(&mut out, &run)?,
        OutputFormat::Json => write_json(&mut out, &run)?,
        OutputFormat::Fasta => write_fasta(&mut out, &run)?,
    }
    out.flush()?;

    // Keep stdout machine-readable for the tabular formats
    if matches!(format, OutputFormat::Tsv | OutputFormat::Fasta) {
        eprintln!("{}", run.summary());
    }

    Ok(())
}

fn write_text(out: &mut dyn Write, run: &ExtractionRun) -> anyhow::Result<()> {
    for result in &run.results {
        writeln!(out, "{}", result.to_row())?;
    }
    writeln!(out, "{}", run.summary())?;
    Ok(())
}

fn write_tsv(out: &mut dyn Write, run: &ExtractionRun) -> anyhow::Result<()> {
    writeln!(out, "seqid\tstart\tend\tstrand\tsequence\ttranscript")?;
    for (feature, result) in run.iter() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            result.seqid,
            feature.start(),
            feature.end(),
            feature.strand(),
            result.sequence,
            feature.transcript(),
        )?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, run: &ExtractionRun) -> anyhow::Result<()> {
    let results: Vec<_> = run
        .iter()
        .map(|(feature, result)| {
            serde_json::json!({
                "seqid": result.seqid,
                "start": feature.start(),
                "end": feature.end(),
                "strand": feature.strand(),
                "transcript": feature.transcript(),
                "sequence": result.sequence,
            })
        })
        .collect();

    let output = serde_json::json!({
        "results": results,
        "summary": run.summary(),
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_fasta(out: &mut dyn Write, run: &ExtractionRun) -> anyhow::Result<()> {
    for (feature, result) in run.iter() {
        writeln!(
            out,
            ">{}:{}-{}({})",
            result.seqid,
            feature.start(),
            feature.end(),
            feature.strand()
        )?;
        writeln!(out, "{}", result.sequence)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    const GFF: &str = "1\tmirbase\tpre_miRNA\t1\t4\t.\t+\t.\tID=MI1\n\
                       1\tmirbase\tpre_miRNA\t1\t4\t.\t-\t.\tID=MI2\n";
    const FASTA: &str = ">1 desc\nAAAA\nCCCC\n";

    fn parse_args(argv: &[&str]) -> ExtractArgs {
        match Cli::parse_from(argv.iter().copied()).command {
            Commands::Extract(args) => args,
            Commands::Convert(_) => panic!("expected extract"),
        }
    }

    fn render(write: fn(&mut dyn Write, &ExtractionRun) -> anyhow::Result<()>) -> String {
        let run = ExtractionPipeline::default().run(GFF, FASTA).unwrap();
        let mut buffer = Vec::new();
        write(&mut buffer, &run).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_default_config_is_lenient() {
        let args = parse_args(&["premir-extract", "extract", "a.gff3", "g.fa"]);
        assert_eq!(args.config(), ExtractionConfig::default());
    }

    #[test]
    fn test_strict_flag_keeps_marker() {
        let args = parse_args(&[
            "premir-extract",
            "extract",
            "a.gff3",
            "g.fa",
            "--strict",
            "--feature-marker",
            "miRNA_primary_transcript",
        ]);
        let config = args.config();
        assert_eq!(config.annotation.strand, StrandHandling::Strict);
        assert_eq!(config.missing_seqid, MissingSeqidHandling::Strict);
        assert_eq!(config.nucleotides, NucleotideHandling::Strict);
        assert_eq!(config.annotation.feature_marker, "miRNA_primary_transcript");
    }

    #[test]
    fn test_empty_feature_marker_rejected() {
        let result = Cli::try_parse_from([
            "premir-extract",
            "extract",
            "a.gff3",
            "g.fa",
            "--feature-marker",
            "",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_individual_handling_flags() {
        let args = parse_args(&[
            "premir-extract",
            "extract",
            "a.gff3",
            "g.fa",
            "--nucleotide-handling",
            "preserve",
            "--missing-seqid-handling",
            "strict",
        ]);
        let config = args.config();
        assert_eq!(config.annotation.strand, StrandHandling::Lenient);
        assert_eq!(config.missing_seqid, MissingSeqidHandling::Strict);
        assert_eq!(config.nucleotides, NucleotideHandling::Preserve);
    }

    #[test]
    fn test_write_text() {
        assert_eq!(
            render(write_text),
            "1\tCCCC\n1\tGGGG\nExpected: 2 sequences, Actual: 2. Success: True\n"
        );
    }

    #[test]
    fn test_write_tsv() {
        let tsv = render(write_tsv);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "seqid\tstart\tend\tstrand\tsequence\ttranscript");
        assert_eq!(lines[2], "1\t1\t4\t-\tGGGG\tID=MI2");
    }

    #[test]
    fn test_write_fasta() {
        assert_eq!(render(write_fasta), ">1:1-4(+)\nCCCC\n>1:1-4(-)\nGGGG\n");
    }

    #[test]
    fn test_write_json() {
        let value: serde_json::Value = serde_json::from_str(&render(write_json)).unwrap();
        assert_eq!(value["results"][1]["strand"], "reverse");
        assert_eq!(value["results"][1]["sequence"], "GGGG");
        assert_eq!(value["summary"]["success"], true);
        assert_eq!(value["summary"]["expected"], 2);
    }
}
