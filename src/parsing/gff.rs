//! GFF3 annotation parsing.
//!
//! Only lines containing the feature marker (`pre_miRNA` by default) are
//! parsed; everything else, comments and directives included, is skipped
//! without inspection. Selection is a plain substring test over the whole
//! line, so a marker that only appears inside the attributes column still
//! selects the line.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::feature::FeatureRecord;
use crate::core::types::{Strand, StrandHandling};
use crate::parsing::input::read_text;
use crate::parsing::ParseError;
use crate::utils::validation::check_feature_limit;

/// Substring that marks an annotation line as a precursor miRNA feature
pub const DEFAULT_FEATURE_MARKER: &str = "pre_miRNA";

/// Minimum number of tab-separated columns in a feature line
pub const MIN_COLUMNS: usize = 9;

/// Options controlling which lines are read and how strictly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationOptions {
    /// Literal substring a line must contain to be selected
    pub feature_marker: String,
    /// Treatment of strand markers other than `+` and `-`
    pub strand: StrandHandling,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            feature_marker: DEFAULT_FEATURE_MARKER.to_string(),
            strand: StrandHandling::default(),
        }
    }
}

/// A selected annotation line and its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Yield every line containing `marker`, in file order.
pub fn select_feature_lines<'a>(
    text: &'a str,
    marker: &'a str,
) -> impl Iterator<Item = SelectedLine<'a>> + 'a {
    text.lines()
        .enumerate()
        .filter(move |(_, line)| line.contains(marker))
        .map(|(i, line)| SelectedLine {
            // Line numbers in errors are 1-based for user friendliness
            number: i + 1,
            text: line,
        })
}

/// Parse one tab-separated annotation line.
///
/// Columns 0, 3, 4, 6 and 8 hold the seqid, start, end, strand and
/// attributes. `line_number` is only used in error messages.
///
/// # Errors
///
/// Returns `ParseError::MalformedLine` if the line has fewer than 9 columns,
/// a non-numeric coordinate, a start of 0 or an end before its start, and
/// `ParseError::UnrecognizedStrand` for a strand other than `+`/`-` when
/// `strand` is strict.
pub fn parse_line(
    line: &str,
    line_number: usize,
    strand: StrandHandling,
) -> Result<FeatureRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() < MIN_COLUMNS {
        return Err(ParseError::MalformedLine {
            line: line_number,
            reason: format!(
                "expected at least {MIN_COLUMNS} tab-separated columns, found {}",
                fields.len()
            ),
        });
    }

    let start = parse_coordinate(fields[3], "start", line_number)?;
    let end = parse_coordinate(fields[4], "end", line_number)?;
    let strand = parse_strand(fields[6], line_number, strand)?;

    FeatureRecord::new(fields[0], start, end, fields[8], strand).map_err(|e| {
        ParseError::MalformedLine {
            line: line_number,
            reason: e.to_string(),
        }
    })
}

fn parse_coordinate(field: &str, name: &str, line_number: usize) -> Result<u64, ParseError> {
    field.trim().parse().map_err(|_| ParseError::MalformedLine {
        line: line_number,
        reason: format!("invalid {name} coordinate '{field}'"),
    })
}

fn parse_strand(
    marker: &str,
    line_number: usize,
    handling: StrandHandling,
) -> Result<Strand, ParseError> {
    match (marker, handling) {
        ("+", _) => Ok(Strand::Forward),
        ("-", _) => Ok(Strand::Reverse),
        (_, StrandHandling::Lenient) => {
            warn!(
                line = line_number,
                marker, "Unrecognized strand marker, reading as reverse strand"
            );
            Ok(Strand::Reverse)
        }
        (_, StrandHandling::Strict) => Err(ParseError::UnrecognizedStrand {
            line: line_number,
            marker: marker.to_string(),
        }),
    }
}

/// Parse annotation text into features, preserving file order.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for an empty feature marker, the first
/// error from [`parse_line`], or `ParseError::TooManyFeatures` if the limit is
/// exceeded.
pub fn parse_annotation_text(
    text: &str,
    options: &AnnotationOptions,
) -> Result<Vec<FeatureRecord>, ParseError> {
    // An empty marker would select comments and directives too
    if options.feature_marker.is_empty() {
        return Err(ParseError::InvalidFormat(
            "feature marker must not be empty".to_string(),
        ));
    }

    let mut features = Vec::new();

    for selected in select_feature_lines(text, &options.feature_marker) {
        // Check feature limit for DOS protection
        if check_feature_limit(features.len()).is_some() {
            return Err(ParseError::TooManyFeatures(features.len()));
        }

        features.push(parse_line(selected.text, selected.number, options.strand)?);
    }

    debug!(
        features = features.len(),
        marker = %options.feature_marker,
        "Parsed annotation"
    );
    Ok(features)
}

/// Read an annotation file (plain or gzipped) and parse it.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_annotation_text`].
pub fn parse_annotation_file(
    path: &Path,
    options: &AnnotationOptions,
    max_bytes: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    let text = read_text(path, max_bytes)?;
    parse_annotation_text(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GFF: &str = "##gff-version 3
#!genome-build GRCh38
1\tmirbase\tpre_miRNA\t1\t4\t.\t+\t.\tID=MI0000060;Name=hsa-let-7a-1
1\tmirbase\tmiRNA\t2\t3\t.\t+\t.\tID=MIMAT0000062;Derives_from=MI0000060
X\tmirbase\tpre_miRNA\t100\t180\t.\t-\t.\tID=MI0000061;Name=hsa-let-7a-2
";

    #[test]
    fn test_select_feature_lines() {
        let selected: Vec<_> = select_feature_lines(GFF, DEFAULT_FEATURE_MARKER).collect();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].number, 3);
        assert_eq!(selected[1].number, 5);
        assert!(selected[1].text.starts_with("X\t"));
    }

    #[test]
    fn test_select_matches_marker_in_attributes_only() {
        let text = "2\tsrc\tgene\t1\t9\t.\t+\t.\tNote=pre_miRNA host\n\
                    2\tsrc\tgene\t1\t9\t.\t+\t.\tNote=host\n";
        let selected: Vec<_> = select_feature_lines(text, DEFAULT_FEATURE_MARKER).collect();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].text.ends_with("Note=pre_miRNA host"));
    }

    #[test]
    fn test_select_skips_lines_without_marker_even_if_malformed() {
        let text = "garbage\nchr1\tx\tpre_miRNA\t1\t2\t.\t+\t.\tID=a\n";
        let features = parse_annotation_text(text, &AnnotationOptions::default()).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_parse_line_columns() {
        let line = "chr1\tmirbase\tpre_miRNA\t10\t20\t.\t+\t.\tID=mir-1;Name=x";
        let feature = parse_line(line, 1, StrandHandling::Lenient).unwrap();
        assert_eq!(feature.seqid(), "chr1");
        assert_eq!(feature.start(), 10);
        assert_eq!(feature.end(), 20);
        assert_eq!(feature.strand(), Strand::Forward);
        assert_eq!(feature.transcript(), "ID=mir-1;Name=x");
    }

    #[test]
    fn test_parse_line_lenient_strand() {
        for marker in ["-", ".", "?", ""] {
            let line = format!("chr1\ts\tpre_miRNA\t1\t2\t.\t{marker}\t.\tID=a");
            let feature = parse_line(&line, 1, StrandHandling::Lenient).unwrap();
            assert_eq!(feature.strand(), Strand::Reverse, "marker {marker:?}");
        }
    }

    #[test]
    fn test_parse_line_strict_strand() {
        let line = "chr1\ts\tpre_miRNA\t1\t2\t.\t.\t.\tID=a";
        match parse_line(line, 7, StrandHandling::Strict) {
            Err(ParseError::UnrecognizedStrand { line, marker }) => {
                assert_eq!(line, 7);
                assert_eq!(marker, ".");
            }
            other => panic!("expected UnrecognizedStrand, got {other:?}"),
        }

        let line = "chr1\ts\tpre_miRNA\t1\t2\t.\t-\t.\tID=a";
        let feature = parse_line(line, 1, StrandHandling::Strict).unwrap();
        assert_eq!(feature.strand(), Strand::Reverse);
    }

    #[test]
    fn test_parse_line_too_few_columns() {
        let err = parse_line("chr1\ts\tpre_miRNA\t1\t2", 4, StrandHandling::Lenient).unwrap_err();
        match err {
            ParseError::MalformedLine { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("found 5"));
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_line_bad_coordinates() {
        let non_numeric = "chr1\ts\tpre_miRNA\tten\t20\t.\t+\t.\tID=a";
        assert!(matches!(
            parse_line(non_numeric, 1, StrandHandling::Lenient),
            Err(ParseError::MalformedLine { .. })
        ));

        let zero = "chr1\ts\tpre_miRNA\t0\t20\t.\t+\t.\tID=a";
        assert!(matches!(
            parse_line(zero, 1, StrandHandling::Lenient),
            Err(ParseError::MalformedLine { .. })
        ));

        let reversed = "chr1\ts\tpre_miRNA\t30\t20\t.\t+\t.\tID=a";
        assert!(matches!(
            parse_line(reversed, 1, StrandHandling::Lenient),
            Err(ParseError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_parse_annotation_text_reports_file_line() {
        let text = "# header\nchr1\ts\tpre_miRNA\t1\t2\t+\n";
        match parse_annotation_text(text, &AnnotationOptions::default()) {
            Err(ParseError::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_annotation_text_preserves_order() {
        let features = parse_annotation_text(GFF, &AnnotationOptions::default()).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].seqid(), "1");
        assert_eq!(features[1].seqid(), "X");
        assert_eq!(features[1].strand(), Strand::Reverse);
    }

    #[test]
    fn test_custom_feature_marker() {
        let options = AnnotationOptions {
            feature_marker: "\tmiRNA\t".to_string(),
            ..AnnotationOptions::default()
        };
        let features = parse_annotation_text(GFF, &options).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].start(), 2);
    }

    #[test]
    fn test_empty_feature_marker_rejected() {
        let options = AnnotationOptions {
            feature_marker: String::new(),
            ..AnnotationOptions::default()
        };
        let err = parse_annotation_text("##gff-version 3\n", &options).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "chr1\ts\tpre_miRNA\t1\t2\t.\t+\t.\tID=a\r\n";
        let features = parse_annotation_text(text, &AnnotationOptions::default()).unwrap();
        assert_eq!(features[0].transcript(), "ID=a");
    }
}
