use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{open_output, OutputFormat};
use crate::parsing::rnafold::{parse_fold_file, FoldRecord};
use crate::utils::validation::MAX_INPUT_BYTES;

#[derive(Args)]
pub struct ConvertArgs {
    /// RNA fold output: '>id', sequence and 'structure (energy)' lines (plain or .gz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write rows here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum decoded size of the input file, in bytes
    #[arg(long, default_value_t = MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,
}

/// Execute convert subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the output
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConvertArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = parse_fold_file(&args.input, args.max_input_bytes)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if verbose {
        eprintln!("Parsed {} fold records", records.len());
    }

    let mut out = open_output(args.output.as_deref())?;
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        }
        OutputFormat::Fasta => write_fasta(&mut out, &records)?,
        OutputFormat::Text | OutputFormat::Tsv => {
            for record in &records {
                writeln!(out, "{}", record.to_tsv_row())?;
            }
        }
    }
    out.flush()?;

    Ok(())
}

fn write_fasta(out: &mut dyn Write, records: &[FoldRecord]) -> anyhow::Result<()> {
    for record in records {
        writeln!(out, ">{} {} ({})", record.id, record.structure, record.energy)?;
        writeln!(out, "{}", record.sequence)?;
    }
    Ok(())
}
