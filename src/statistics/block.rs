//! Single-value statistics describing a whole block or one or two of its rows.

use super::{BlockStatistic, SimpleStatResult, StatResult};
use crate::alignment::{AlignedSequence, AlignmentBlock, Alphabet, CharacterClass};
use crate::{Error, Result};

fn simple_tags(result: &SimpleStatResult) -> Vec<String> {
    result.as_result().available_tags()
}

/// Number of rows in the block.
#[derive(Debug, Clone)]
pub struct BlockSize {
    result: SimpleStatResult,
}

impl BlockSize {
    /// Create the statistic.
    pub fn new() -> Self {
        Self {
            result: SimpleStatResult::new("BlockSize"),
        }
    }
}

impl BlockStatistic for BlockSize {
    fn short_name(&self) -> String {
        "BlockSize".to_string()
    }

    fn full_name(&self) -> String {
        "Number of sequences.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        self.result.set(block.number_of_sequences());
        Ok(())
    }

    fn result(&self) -> &StatResult {
        self.result.as_result()
    }

    fn supported_tags(&self) -> Vec<String> {
        simple_tags(&self.result)
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

/// Number of columns in the block.
#[derive(Debug, Clone)]
pub struct BlockLength {
    result: SimpleStatResult,
}

impl BlockLength {
    /// Create the statistic.
    pub fn new() -> Self {
        Self {
            result: SimpleStatResult::new("BlockLength"),
        }
    }
}

impl BlockStatistic for BlockLength {
    fn short_name(&self) -> String {
        "BlockLength".to_string()
    }

    fn full_name(&self) -> String {
        "Number of sites.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        self.result.set(block.number_of_sites());
        Ok(())
    }

    fn result(&self) -> &StatResult {
        self.result.as_result()
    }

    fn supported_tags(&self) -> Vec<String> {
        simple_tags(&self.result)
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

/// Alignment score of the block (NaN when the block has none).
#[derive(Debug, Clone)]
pub struct AlignmentScore {
    result: SimpleStatResult,
}

impl AlignmentScore {
    /// Create the statistic.
    pub fn new() -> Self {
        Self {
            result: SimpleStatResult::new("AlnScore"),
        }
    }
}

impl BlockStatistic for AlignmentScore {
    fn short_name(&self) -> String {
        "AlnScore".to_string()
    }

    fn full_name(&self) -> String {
        "Alignment score.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        self.result.set(block.score());
        Ok(())
    }

    fn result(&self) -> &StatResult {
        self.result.as_result()
    }

    fn supported_tags(&self) -> Vec<String> {
        simple_tags(&self.result)
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

/// Row for `species`, `None` if absent, an error if there are several.
pub(super) fn unique_row<'b>(
    block: &'b AlignmentBlock,
    species: &str,
) -> Result<Option<&'b AlignedSequence>> {
    let rows = block.sequences_for_species(species);
    match rows.as_slice() {
        [] => Ok(None),
        [row] => Ok(Some(*row)),
        _ => Err(Error::inconsistent(format!(
            "{} sequences found for species {species} in current block",
            rows.len()
        ))),
    }
}

/// Number of non-gap characters of one species' row.
///
/// Zero when the species is absent; fails if the species has several rows.
#[derive(Debug, Clone)]
pub struct SequenceLength {
    species: String,
    result: SimpleStatResult,
}

impl SequenceLength {
    /// Create the statistic for `species`.
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            result: SimpleStatResult::new("SequenceLength"),
        }
    }
}

impl BlockStatistic for SequenceLength {
    fn short_name(&self) -> String {
        format!("SequenceLengthFor{}", self.species)
    }

    fn full_name(&self) -> String {
        format!("Sequence length for species {}", self.species)
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let length = unique_row(block, &self.species)?.map_or(0, AlignedSequence::number_of_sites);
        self.result.set(length);
        Ok(())
    }

    fn result(&self) -> &StatResult {
        self.result.as_result()
    }

    fn supported_tags(&self) -> Vec<String> {
        simple_tags(&self.result)
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

/// Percentage of differing columns between the rows of two species.
///
/// Only columns where both rows carry a resolved nucleotide are compared.
/// The value is NaN when either species is missing from the block or no
/// column is comparable.
#[derive(Debug, Clone)]
pub struct PairwiseDivergence {
    alphabet: Alphabet,
    species1: String,
    species2: String,
    result: SimpleStatResult,
}

impl PairwiseDivergence {
    /// Create the statistic for two distinct species.
    pub fn new(
        alphabet: Alphabet,
        species1: impl Into<String>,
        species2: impl Into<String>,
    ) -> Result<Self> {
        let (species1, species2) = (species1.into(), species2.into());
        if species1 == species2 {
            return Err(Error::configuration(format!(
                "pairwise divergence needs two distinct species, got {species1} twice"
            )));
        }
        Ok(Self {
            alphabet,
            species1,
            species2,
            result: SimpleStatResult::new("Divergence"),
        })
    }

    fn divergence(&self, first: &AlignedSequence, second: &AlignedSequence) -> f64 {
        let mut compared = 0u64;
        let mut different = 0u64;
        for (&a, &b) in first.text().iter().zip(second.text()) {
            if let (CharacterClass::State(x), CharacterClass::State(y)) =
                (self.alphabet.classify(a), self.alphabet.classify(b))
            {
                compared += 1;
                if x != y {
                    different += 1;
                }
            }
        }
        if compared == 0 {
            f64::NAN
        } else {
            100.0 * different as f64 / compared as f64
        }
    }
}

impl BlockStatistic for PairwiseDivergence {
    fn short_name(&self) -> String {
        format!("Div.{}-{}", self.species1, self.species2)
    }

    fn full_name(&self) -> String {
        format!(
            "Pairwise divergence between {} and {}.",
            self.species1, self.species2
        )
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let first = unique_row(block, &self.species1)?;
        let second = unique_row(block, &self.species2)?;
        let value = match (first, second) {
            (Some(a), Some(b)) => self.divergence(a, b),
            _ => f64::NAN,
        };
        self.result.set(value);
        Ok(())
    }

    fn result(&self) -> &StatResult {
        self.result.as_result()
    }

    fn supported_tags(&self) -> Vec<String> {
        simple_tags(&self.result)
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}
