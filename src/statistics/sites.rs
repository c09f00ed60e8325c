use super::{BlockStatistic, StatResult};
use crate::alignment::{AlignmentBlock, Alphabet, SpeciesSelection};
use crate::Result;

const TAGS: [&str; 7] = [
    "NbWithoutGap",
    "NbComplete",
    "NbConstant",
    "NbBiallelic",
    "NbTriallelic",
    "NbQuadriallelic",
    "NbParsimonyInformative",
];

/// Per-block column classification over the selected rows.
///
/// Allele classes are only assessed on complete columns (no gap, no
/// unresolved character). Parsimony informativeness looks at the resolved
/// characters of any column.
#[derive(Debug, Clone)]
pub struct SiteStatistics {
    alphabet: Alphabet,
    selection: SpeciesSelection,
    result: StatResult,
}

impl SiteStatistics {
    /// Create the statistic. An empty species list selects every row.
    pub fn new<I, S>(alphabet: Alphabet, species: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            alphabet,
            selection: SpeciesSelection::all_if_empty(species)?,
            result: StatResult::new(),
        })
    }
}

impl BlockStatistic for SiteStatistics {
    fn short_name(&self) -> String {
        "SiteStatistics".to_string()
    }

    fn full_name(&self) -> String {
        "Site statistics.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let alignment = self.selection.project(block);
        let mut counts = [0u64; TAGS.len()];
        for site in alignment.site_summaries(self.alphabet) {
            if site.is_without_gap() {
                counts[0] += 1;
            }
            if site.is_parsimony_informative() {
                counts[6] += 1;
            }
            if !site.is_complete() {
                continue;
            }
            counts[1] += 1;
            match site.distinct_states() {
                1 => counts[2] += 1,
                2 => counts[3] += 1,
                3 => counts[4] += 1,
                4 => counts[5] += 1,
                _ => {}
            }
        }

        let mut result = StatResult::new();
        for (tag, count) in TAGS.into_iter().zip(counts) {
            result.set_value(tag, count);
        }
        self.result = result;
        Ok(())
    }

    fn result(&self) -> &StatResult {
        &self.result
    }

    fn supported_tags(&self) -> Vec<String> {
        TAGS.iter().map(|t| t.to_string()).collect()
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignedSequence;

    #[test]
    fn columns_are_classified() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("a.1", "AAAAA-N"),
            AlignedSequence::new("b.1", "AACCAAA"),
            AlignedSequence::new("c.1", "ACGGCAA"),
            AlignedSequence::new("d.1", "ACGTCAA"),
        ])
        .unwrap();
        let mut stat = SiteStatistics::new(Alphabet::Dna, Vec::<String>::new()).unwrap();
        stat.compute(&block).unwrap();
        let values: Vec<u64> = TAGS
            .iter()
            .map(|t| stat.result().value(t).unwrap().as_unsigned().unwrap())
            .collect();
        // Complete columns: AAAA, AACC, ACGG, ACGT, AACC.
        assert_eq!(values, vec![6, 5, 1, 2, 1, 1, 2]);
    }

    #[test]
    fn parsimony_informative_columns_may_be_incomplete() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("a.1", "AAA"),
            AlignedSequence::new("b.1", "AAA"),
            AlignedSequence::new("c.1", "CCC"),
            AlignedSequence::new("d.1", "CCA"),
            AlignedSequence::new("e.1", "-NC"),
        ])
        .unwrap();
        let mut stat = SiteStatistics::new(Alphabet::Dna, Vec::<String>::new()).unwrap();
        stat.compute(&block).unwrap();
        let value = |tag: &str| stat.result().value(tag).unwrap().as_unsigned().unwrap();
        assert_eq!(value("NbWithoutGap"), 2);
        assert_eq!(value("NbComplete"), 1);
        assert_eq!(value("NbBiallelic"), 1);
        assert_eq!(value("NbParsimonyInformative"), 3);
    }

    #[test]
    fn selection_changes_the_picture() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("a.1", "A-"),
            AlignedSequence::new("b.1", "CA"),
        ])
        .unwrap();
        let mut stat = SiteStatistics::new(Alphabet::Dna, ["b"]).unwrap();
        stat.compute(&block).unwrap();
        assert_eq!(stat.result().value("NbComplete").unwrap().as_unsigned(), Some(2));
        assert_eq!(stat.result().value("NbConstant").unwrap().as_unsigned(), Some(2));
    }
}
