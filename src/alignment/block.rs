use std::sync::Arc;

use crate::feature::{SeqRange, Strand};
use crate::{Error, Result};

/// One aligned row of a block: a stretch of a species' genome with gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSequence {
    /// Species identifier (the part of the MAF source before the first `.`).
    species: Arc<str>,
    /// Chromosome or contig name (the rest of the MAF source, may be empty).
    chromosome: Arc<str>,
    /// 0-based start on the source strand.
    start: u64,
    /// Number of bases aligned (gaps excluded).
    size: u64,
    /// Strand of the source sequence.
    strand: Strand,
    /// Total length of the source sequence.
    src_size: u64,
    /// Aligned characters, gaps included.
    text: Arc<[u8]>,
}

impl AlignedSequence {
    /// Create a row from a MAF-style source name (`species.chromosome`) and
    /// its aligned text. Coordinates default to the text itself.
    pub fn new(src: &str, text: impl Into<Vec<u8>>) -> Self {
        let (species, chromosome) = src.split_once('.').unwrap_or((src, ""));
        let text: Vec<u8> = text.into();
        let size = text.iter().filter(|&&c| !is_gap(c)).count() as u64;
        Self {
            species: Arc::from(species),
            chromosome: Arc::from(chromosome),
            start: 0,
            size,
            strand: Strand::Plus,
            src_size: size,
            text: Arc::from(text.into_boxed_slice()),
        }
    }

    /// Attach source coordinates.
    pub fn with_coordinates(mut self, start: u64, size: u64, strand: Strand, src_size: u64) -> Self {
        self.start = start;
        self.size = size;
        self.strand = strand;
        self.src_size = src_size;
        self
    }

    /// Species identifier.
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Chromosome or contig name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// 0-based start position on the source strand.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Number of aligned bases declared for the row.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Strand of the source.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Length of the full source sequence.
    pub fn src_size(&self) -> u64 {
        self.src_size
    }

    /// Coordinates of the row on its source sequence.
    pub fn range(&self) -> SeqRange {
        SeqRange::new(self.start, self.start + self.size, self.strand)
    }

    /// Aligned characters, gaps included.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if the row has no column.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character at column `site`.
    pub fn char_at(&self, site: usize) -> Option<u8> {
        self.text.get(site).copied()
    }

    /// Number of non-gap characters in the row.
    pub fn number_of_sites(&self) -> usize {
        self.text.iter().filter(|&&c| !is_gap(c)).count()
    }
}

fn is_gap(c: u8) -> bool {
    c == b'-' || c == b'.'
}

/// Multiple alignment block: rows of equal length, one or more per species.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentBlock {
    score: f64,
    sequences: Vec<AlignedSequence>,
}

impl AlignmentBlock {
    /// Create an empty block without score.
    pub fn new() -> Self {
        Self {
            score: f64::NAN,
            sequences: Vec::new(),
        }
    }

    /// Builder-style score assignment.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Build a block from rows, checking that they all have the same length.
    pub fn from_sequences(sequences: impl IntoIterator<Item = AlignedSequence>) -> Result<Self> {
        let mut block = Self::new();
        for sequence in sequences {
            block.push(sequence)?;
        }
        Ok(block)
    }

    /// Append a row. Fails if its length differs from the rows already present.
    pub fn push(&mut self, sequence: AlignedSequence) -> Result<()> {
        if let Some(first) = self.sequences.first() {
            if first.len() != sequence.len() {
                return Err(Error::inconsistent(format!(
                    "row for {}.{} has {} columns, block has {}",
                    sequence.species(),
                    sequence.chromosome(),
                    sequence.len(),
                    first.len()
                )));
            }
        }
        self.sequences.push(sequence);
        Ok(())
    }

    /// Alignment score, NaN when the block carries none.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of rows.
    pub fn number_of_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Number of columns.
    pub fn number_of_sites(&self) -> usize {
        self.sequences.first().map_or(0, AlignedSequence::len)
    }

    /// All rows in block order.
    pub fn sequences(&self) -> &[AlignedSequence] {
        &self.sequences
    }

    /// Rows belonging to `species`, in block order.
    pub fn sequences_for_species(&self, species: &str) -> Vec<&AlignedSequence> {
        self.sequences
            .iter()
            .filter(|seq| seq.species() == species)
            .collect()
    }

    /// Distinct species in order of first appearance.
    pub fn species(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for seq in &self.sequences {
            if !seen.contains(&seq.species()) {
                seen.push(seq.species());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name_splits_species() {
        let seq = AlignedSequence::new("hg38.chr1", "AC-GT");
        assert_eq!(seq.species(), "hg38");
        assert_eq!(seq.chromosome(), "chr1");
        assert_eq!(seq.number_of_sites(), 4);
        assert_eq!(seq.len(), 5);

        let bare = AlignedSequence::new("mouse", "A");
        assert_eq!(bare.species(), "mouse");
        assert_eq!(bare.chromosome(), "");
    }

    #[test]
    fn dotted_contig_names_are_kept() {
        let seq = AlignedSequence::new("panTro4.chrUn.random", "A");
        assert_eq!(seq.species(), "panTro4");
        assert_eq!(seq.chromosome(), "chrUn.random");
    }

    #[test]
    fn rows_must_have_equal_length() {
        let mut block = AlignmentBlock::new();
        block.push(AlignedSequence::new("a.1", "ACGT")).unwrap();
        let err = block.push(AlignedSequence::new("b.1", "ACG")).unwrap_err();
        assert!(matches!(err, Error::DataInconsistency(_)));
        assert_eq!(block.number_of_sequences(), 1);
        assert_eq!(block.number_of_sites(), 4);
    }

    #[test]
    fn species_lookup_preserves_order() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("hg.chr1", "AC"),
            AlignedSequence::new("mm.chr2", "AG"),
            AlignedSequence::new("hg.chr5", "AT"),
        ])
        .unwrap();
        let rows = block.sequences_for_species("hg");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].chromosome(), "chr5");
        assert_eq!(block.species(), vec!["hg", "mm"]);
        assert!(block.score().is_nan());
    }

    #[test]
    fn coordinates_map_to_range() {
        let seq = AlignedSequence::new("hg.chr1", "AC-T").with_coordinates(100, 3, Strand::Minus, 1000);
        let range = seq.range();
        assert_eq!((range.start(), range.end()), (100, 103));
        assert!(range.is_negative_strand());
    }
}
