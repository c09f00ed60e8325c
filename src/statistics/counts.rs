use super::{BlockStatistic, StatResult};
use crate::alignment::{AlignmentBlock, Alphabet, CharacterClass, SpeciesSelection, NUM_STATES};
use crate::Result;

const GAP_TAG: &str = "Gap";
const UNRESOLVED_TAG: &str = "Unresolved";

/// Character composition of the selected rows of a block.
///
/// Tags: `A`, `C`, `G`, `T` (`U` for RNA), `Gap`, `Unresolved`. The six
/// counts always add up to `rows x columns`. An empty species list selects
/// every row.
#[derive(Debug, Clone)]
pub struct CharacterCounts {
    alphabet: Alphabet,
    selection: SpeciesSelection,
    suffix: String,
    result: StatResult,
}

impl CharacterCounts {
    /// Create the statistic. `suffix` distinguishes several instances in output.
    pub fn new<I, S>(alphabet: Alphabet, species: I, suffix: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            alphabet,
            selection: SpeciesSelection::all_if_empty(species)?,
            suffix: suffix.into(),
            result: StatResult::new(),
        })
    }

    fn state_tags(&self) -> [String; NUM_STATES] {
        std::array::from_fn(|state| self.alphabet.state_symbol(state).to_string())
    }
}

impl BlockStatistic for CharacterCounts {
    fn short_name(&self) -> String {
        format!("Counts{}", self.suffix)
    }

    fn full_name(&self) -> String {
        format!("Character counts ({}).", self.suffix)
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let alignment = self.selection.project(block);
        let mut states = [0u64; NUM_STATES];
        let mut gaps = 0u64;
        let mut unresolved = 0u64;

        for row in alignment.rows() {
            for &symbol in row.text() {
                match self.alphabet.classify(symbol) {
                    CharacterClass::State(idx) => states[idx as usize] += 1,
                    CharacterClass::Gap => gaps += 1,
                    CharacterClass::Unresolved => unresolved += 1,
                }
            }
        }

        let mut result = StatResult::new();
        for (tag, count) in self.state_tags().into_iter().zip(states) {
            result.set_value(tag, count);
        }
        result.set_value(GAP_TAG, gaps);
        result.set_value(UNRESOLVED_TAG, unresolved);
        tracing::trace!(
            rows = alignment.number_of_sequences(),
            sites = alignment.number_of_sites(),
            "character counts computed"
        );
        self.result = result;
        Ok(())
    }

    fn result(&self) -> &StatResult {
        &self.result
    }

    fn supported_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.state_tags().into();
        tags.push(GAP_TAG.to_string());
        tags.push(UNRESOLVED_TAG.to_string());
        tags
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}
