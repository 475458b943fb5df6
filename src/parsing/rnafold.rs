//! Parser for RNA secondary-structure prediction output.
//!
//! Each record is a block of three lines:
//!
//! ```text
//! >hsa-let-7a-1
//! UGGGAUGAGGUAGUAGGUUGUAUAGUUUUAG
//! ((((((((((((((....)))))))))))))). (-34.20)
//! ```
//!
//! and becomes one tab-separated row: id, sequence, structure, energy, with
//! the parentheses around the energy removed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::input::read_text;
use crate::parsing::ParseError;

/// One folded sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldRecord {
    pub id: String,
    pub sequence: String,
    /// Dot-bracket notation
    pub structure: String,
    /// Minimum free energy, as written (e.g. `-34.20`)
    pub energy: String,
}

impl FoldRecord {
    #[must_use]
    pub fn to_tsv_row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.id, self.sequence, self.structure, self.energy
        )
    }
}

/// Parse fold blocks from text. Blank lines between blocks are ignored.
///
/// # Errors
///
/// Returns `ParseError::MalformedLine` if a block does not start with a
/// `>` header, is missing its sequence or structure line, or its structure
/// line has no energy.
pub fn parse_fold_text(text: &str) -> Result<Vec<FoldRecord>, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty());
    let mut records = Vec::new();

    while let Some((number, header)) = lines.next() {
        let id = header
            .strip_prefix('>')
            .ok_or_else(|| ParseError::MalformedLine {
                line: number,
                reason: format!("expected a '>' record header, found '{header}'"),
            })?;

        let truncated = || ParseError::MalformedLine {
            line: number,
            reason: format!("record '{id}' is missing its sequence or structure line"),
        };
        let (_, sequence) = lines.next().ok_or_else(truncated)?;
        let (structure_number, structure_line) = lines.next().ok_or_else(truncated)?;

        let (structure, energy) = split_structure_line(structure_line).ok_or_else(|| {
            ParseError::MalformedLine {
                line: structure_number,
                reason: format!("expected 'structure (energy)', found '{structure_line}'"),
            }
        })?;

        records.push(FoldRecord {
            id: id.trim().to_string(),
            sequence: sequence.trim().to_string(),
            structure: structure.to_string(),
            energy: energy.to_string(),
        });
    }

    debug!(records = records.len(), "Parsed fold records");
    Ok(records)
}

/// Split `"((..)) (-3.40)"` into `("((..))", "-3.40")`.
fn split_structure_line(line: &str) -> Option<(&str, &str)> {
    let (structure, rest) = line.trim().split_once(char::is_whitespace)?;
    let energy = rest
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();

    if energy.is_empty() {
        None
    } else {
        Some((structure, energy))
    }
}

/// Read a fold file (plain or gzipped) and parse it.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_fold_text`].
pub fn parse_fold_file(path: &Path, max_bytes: u64) -> Result<Vec<FoldRecord>, ParseError> {
    let text = read_text(path, max_bytes)?;
    parse_fold_text(&text)
}
