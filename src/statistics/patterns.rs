use super::block::unique_row;
use super::{BlockStatistic, StatResult};
use crate::alignment::{AlignedSequence, AlignmentBlock, Alphabet, SpeciesSelection};
use crate::{Error, Result};

const PATTERN_TAGS: [&str; 3] = ["P1", "P2", "P3"];

/// Counts of the three bipartition patterns of four species A, B, C, D.
///
/// Only columns where all four rows are resolved and show exactly two
/// states split two against two are counted:
///
/// * `P1`: AB | CD
/// * `P2`: AD | BC
/// * `P3`: AC | BD
///
/// A, B, C, D follow the order the species were given in, not the block row
/// order. Blocks missing any of the four species give zero counts.
#[derive(Debug, Clone)]
pub struct FourSpeciesPatternCounts {
    alphabet: Alphabet,
    species: SpeciesSelection,
    result: StatResult,
}

impl FourSpeciesPatternCounts {
    /// Create the statistic for exactly four distinct species.
    pub fn new<I, S>(alphabet: Alphabet, species: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let species = SpeciesSelection::new(species)?;
        if species.len() != 4 {
            return Err(Error::configuration(format!(
                "four-species pattern counts need exactly 4 species, got {}",
                species.len()
            )));
        }
        Ok(Self {
            alphabet,
            species,
            result: StatResult::new(),
        })
    }

    fn pattern(&self, column: [u8; 4]) -> Option<usize> {
        let mut states = [0usize; 4];
        for (slot, symbol) in states.iter_mut().zip(column) {
            *slot = self.alphabet.classify(symbol).state()?;
        }
        let [a, b, c, d] = states;
        let mut others = states.iter().filter(|&&s| s != a);
        // Two states, two rows each.
        match (others.next(), others.next(), others.next()) {
            (Some(x), Some(y), None) if x == y => {}
            _ => return None,
        }
        if a == b {
            Some(0)
        } else if a == d {
            Some(1)
        } else {
            debug_assert_eq!(a, c);
            Some(2)
        }
    }
}

impl BlockStatistic for FourSpeciesPatternCounts {
    fn short_name(&self) -> String {
        "FourSpeciesPatternCounts".to_string()
    }

    fn full_name(&self) -> String {
        "Four species pattern counts.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let mut rows: Vec<&AlignedSequence> = Vec::with_capacity(4);
        for species in self.species.species() {
            if let Some(row) = unique_row(block, species)? {
                rows.push(row);
            }
        }

        let mut counts = [0u64; 3];
        if let [a, b, c, d] = rows.as_slice() {
            for site in 0..block.number_of_sites() {
                let column = [a, b, c, d].map(|row| row.text()[site]);
                if let Some(idx) = self.pattern(column) {
                    counts[idx] += 1;
                }
            }
        }

        let mut result = StatResult::new();
        for (tag, count) in PATTERN_TAGS.into_iter().zip(counts) {
            result.set_value(tag, count);
        }
        self.result = result;
        Ok(())
    }

    fn result(&self) -> &StatResult {
        &self.result
    }

    fn supported_tags(&self) -> Vec<String> {
        PATTERN_TAGS.iter().map(|t| t.to_string()).collect()
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}
