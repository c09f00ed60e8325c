use super::alphabet::{Alphabet, CharacterClass, NUM_STATES};

/// Character tallies for one alignment column over a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteSummary {
    /// Per-state counts [A, C, G, T/U].
    pub state_counts: [u32; NUM_STATES],
    /// Number of gap characters.
    pub gaps: u32,
    /// Number of unresolved characters.
    pub unresolved: u32,
}

impl SiteSummary {
    /// Tally the characters of a column.
    pub fn from_column(alphabet: Alphabet, column: impl IntoIterator<Item = u8>) -> Self {
        let mut summary = Self::default();
        for symbol in column {
            summary.observe(alphabet.classify(symbol));
        }
        summary
    }

    /// Record one classified character.
    pub fn observe(&mut self, class: CharacterClass) {
        match class {
            CharacterClass::State(idx) => self.state_counts[idx as usize] += 1,
            CharacterClass::Gap => self.gaps += 1,
            CharacterClass::Unresolved => self.unresolved += 1,
        }
    }

    /// Total number of characters seen.
    pub fn depth(&self) -> u32 {
        self.resolved() + self.gaps + self.unresolved
    }

    /// Number of resolved characters.
    pub fn resolved(&self) -> u32 {
        self.state_counts.iter().sum()
    }

    /// No row carries a gap.
    pub fn is_without_gap(&self) -> bool {
        self.gaps == 0
    }

    /// No gap and no unresolved character.
    pub fn is_complete(&self) -> bool {
        self.gaps == 0 && self.unresolved == 0
    }

    /// Number of distinct resolved states.
    pub fn distinct_states(&self) -> usize {
        self.state_counts.iter().filter(|&&c| c > 0).count()
    }

    /// At least two states each carried by at least two rows.
    pub fn is_parsimony_informative(&self) -> bool {
        self.state_counts.iter().filter(|&&c| c >= 2).count() >= 2
    }

    /// The only resolved state present, if exactly one.
    pub fn single_state(&self) -> Option<usize> {
        match self.distinct_states() {
            1 => self.state_counts.iter().position(|&c| c > 0),
            _ => None,
        }
    }

    /// Count of the least frequent of exactly two states present.
    pub fn minor_allele_count(&self) -> Option<u32> {
        if self.distinct_states() != 2 {
            return None;
        }
        self.state_counts.iter().copied().filter(|&c| c > 0).min()
    }

    /// Number of pairs of rows with different resolved states.
    pub fn pairwise_differences(&self) -> u64 {
        let n = u64::from(self.resolved());
        let same: u64 = self
            .state_counts
            .iter()
            .map(|&c| u64::from(c) * u64::from(c.saturating_sub(1)) / 2)
            .sum();
        n * n.saturating_sub(1) / 2 - same
    }
}
