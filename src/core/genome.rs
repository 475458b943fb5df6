use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::codec::split_fasta_record;

/// Record delimiter at the start of every FASTA header
pub const RECORD_DELIMITER: char = '>';

/// Lookup from sequence identifier to the raw sequence block of its record.
///
/// Blocks are kept exactly as they appear after the header line, line breaks
/// included. Flattening is left to the caller (see
/// [`flatten_block`](crate::core::feature::flatten_block)).
#[derive(Debug, Clone, Default)]
pub struct GenomeIndex {
    blocks: HashMap<String, String>,
}

impl GenomeIndex {
    /// Build an index from FASTA text.
    ///
    /// The key for each record is the first whitespace-delimited token of its
    /// header. Text before the first `>` is ignored, and a later record with a
    /// duplicate key replaces the earlier one.
    #[must_use]
    pub fn build(fasta_text: &str) -> Self {
        let mut blocks = HashMap::new();

        for record in fasta_text.split(RECORD_DELIMITER).skip(1) {
            let (header, block) = split_fasta_record(record);
            let seqid = header.split_whitespace().next().unwrap_or_default();

            if blocks
                .insert(seqid.to_string(), block.to_string())
                .is_some()
            {
                warn!(seqid, "Duplicate FASTA header, keeping the later record");
            }
        }

        debug!(records = blocks.len(), "Built genome index");
        Self { blocks }
    }

    /// Raw block for `seqid`, or `None` if the genome has no such record
    #[must_use]
    pub fn lookup(&self, seqid: &str) -> Option<&str> {
        self.blocks.get(seqid).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, seqid: &str) -> bool {
        self.blocks.contains_key(seqid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Indexed seqids, sorted for stable output
    #[must_use]
    pub fn seqids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keys_on_first_header_token() {
        let index = GenomeIndex::build(">chr1 primary assembly\nACGT\nTTTT\n>chr2\nGGGG\n");
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("chr1"), Some("ACGT\nTTTT\n"));
        assert_eq!(index.lookup("chr2"), Some("GGGG\n"));
        assert_eq!(index.seqids(), vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_build_splits_on_tab_in_header() {
        let index = GenomeIndex::build(">1\tdna:chromosome\nAAAA\n");
        assert!(index.contains("1"));
    }

    #[test]
    fn test_build_ignores_text_before_first_record() {
        let index = GenomeIndex::build("stray text\n>chr1\nAC\n");
        assert_eq!(index.len(), 1);
        assert!(!index.contains("stray"));
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let index = GenomeIndex::build(">chr1\nAC\n");
        assert_eq!(index.lookup("chrX"), None);
        assert_eq!(index.lookup("CHR1"), None);
    }

    #[test]
    fn test_duplicate_header_overwrites() {
        let index = GenomeIndex::build(">chr1\nAAAA\n>chr1 again\nCCCC\n");
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("chr1"), Some("CCCC\n"));
    }

    #[test]
    fn test_empty_input() {
        let index = GenomeIndex::build("");
        assert!(index.is_empty());
    }

    #[test]
    fn test_header_only_record() {
        let index = GenomeIndex::build(">chr1");
        assert_eq!(index.lookup("chr1"), Some(""));
    }
}
