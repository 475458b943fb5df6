//! Read whole input files into memory.
//!
//! Supports both uncompressed and gzip/bgzip compressed files, chosen by
//! extension (`.gz`, `.bgz`). The path `-` reads standard input.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::parsing::ParseError;
use crate::utils::validation::{is_gzipped, is_stdin};

/// Read a text file, decompressing it if gzipped.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or decoded,
/// `ParseError::InputTooLarge` if the decoded text exceeds `max_bytes`, or
/// `ParseError::InvalidFormat` if it is not valid UTF-8.
pub fn read_text(path: &Path, max_bytes: u64) -> Result<String, ParseError> {
    let text = if is_stdin(path) {
        read_limited(io::stdin().lock(), max_bytes)?
    } else if is_gzipped(path) {
        let file = File::open(path)?;
        read_limited(MultiGzDecoder::new(BufReader::new(file)), max_bytes)?
    } else {
        read_limited(BufReader::new(File::open(path)?), max_bytes)?
    };

    debug!(path = %path.display(), bytes = text.len(), "Read input");
    Ok(text)
}

/// Read at most `max_bytes` of UTF-8 text from `reader`.
///
/// # Errors
///
/// Returns `ParseError::InputTooLarge` if the reader holds more than
/// `max_bytes`, or the IO/UTF-8 errors of [`read_text`].
pub fn read_limited<R: Read>(reader: R, max_bytes: u64) -> Result<String, ParseError> {
    let mut buffer = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)?;

    if buffer.len() as u64 > max_bytes {
        return Err(ParseError::InputTooLarge { limit: max_bytes });
    }

    String::from_utf8(buffer)
        .map_err(|e| ParseError::InvalidFormat(format!("Input is not valid UTF-8: {e}")))
}
