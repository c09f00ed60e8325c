use super::{BlockStatistic, StatResult};
use crate::alignment::{AlignmentBlock, Alphabet, SiteSummary, SpeciesGroups, SubAlignment};
use crate::{Error, Result};

const TAGS: [&str; 10] = ["F", "P", "FF", "PF", "FP", "X", "FX", "PX", "XF", "XP"];

/// Status of one column within one population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteStatus {
    /// Monomorphic, with the fixed state.
    Fixed(usize),
    Polymorphic,
    /// Unusable: no row, a gap or an unresolved character.
    Excluded,
}

impl SiteStatus {
    fn of(summary: &SiteSummary, rows: usize) -> Self {
        if rows == 0 || !summary.is_complete() {
            return SiteStatus::Excluded;
        }
        match summary.single_state() {
            Some(state) => SiteStatus::Fixed(state),
            None => SiteStatus::Polymorphic,
        }
    }
}

/// Joint fixed/polymorphic classification of columns in two populations.
///
/// Each column is classified per population as fixed (F), polymorphic (P)
/// or excluded (X), and the pair is tallied with population 1 first:
///
/// * `F`: fixed in both, to the same state
/// * `FF`: fixed in both, to different states
/// * `P`: polymorphic in both
/// * `FP`, `PF`, `FX`, `XF`, `PX`, `XP`: mixed cases
/// * `X`: excluded in both
#[derive(Debug, Clone)]
pub struct PolymorphismStatistics {
    alphabet: Alphabet,
    populations: SpeciesGroups,
    result: StatResult,
}

impl PolymorphismStatistics {
    /// Create the statistic from exactly two disjoint species lists.
    pub fn new<G, I, S>(alphabet: Alphabet, populations: G) -> Result<Self>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let populations = SpeciesGroups::new(populations)?;
        if populations.len() != 2 {
            return Err(Error::configuration(format!(
                "polymorphism statistics need exactly 2 populations, got {}",
                populations.len()
            )));
        }
        Ok(Self {
            alphabet,
            populations,
            result: StatResult::new(),
        })
    }

    fn status(&self, population: &SubAlignment<'_>, site: usize) -> SiteStatus {
        let summary = population.site_summary(self.alphabet, site);
        SiteStatus::of(&summary, population.number_of_sequences())
    }

    /// Position in [`TAGS`] of the pair, population 1 first.
    fn tag_index(first: SiteStatus, second: SiteStatus) -> usize {
        use SiteStatus::{Excluded, Fixed, Polymorphic};
        match (first, second) {
            (Fixed(a), Fixed(b)) if a == b => 0,
            (Polymorphic, Polymorphic) => 1,
            (Fixed(_), Fixed(_)) => 2,
            (Polymorphic, Fixed(_)) => 3,
            (Fixed(_), Polymorphic) => 4,
            (Excluded, Excluded) => 5,
            (Fixed(_), Excluded) => 6,
            (Polymorphic, Excluded) => 7,
            (Excluded, Fixed(_)) => 8,
            (Excluded, Polymorphic) => 9,
        }
    }
}

impl BlockStatistic for PolymorphismStatistics {
    fn short_name(&self) -> String {
        "PolymorphismStatistics".to_string()
    }

    fn full_name(&self) -> String {
        "Polymorphism statistics.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let populations = self.populations.project(block);
        let (first, second) = match populations.as_slice() {
            [first, second] => (first, second),
            _ => return Err(Error::configuration("expected two populations")),
        };

        let mut counts = [0u64; TAGS.len()];
        for site in 0..block.number_of_sites() {
            counts[Self::tag_index(self.status(first, site), self.status(second, site))] += 1;
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

    fn value(stat: &PolymorphismStatistics, tag: &str) -> u64 {
        stat.result().value(tag).unwrap().as_unsigned().unwrap()
    }

    #[test]
    fn columns_are_classified_per_population() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("p1a.1", "AAAAA-A--A"),
            AlignedSequence::new("p1b.1", "AACCAAA-AC"),
            AlignedSequence::new("p2a.1", "ACCCAAN-AA"),
            AlignedSequence::new("p2b.1", "ACCAGAA-C-"),
        ])
        .unwrap();
        let mut stat = PolymorphismStatistics::new(
            Alphabet::Dna,
            [vec!["p1a", "p1b"], vec!["p2a", "p2b"]],
        )
        .unwrap();
        stat.compute(&block).unwrap();
        // Columns: F, FF, PF, P, FP, XF, FX, X, XP, PX.
        let expected = [
            ("F", 1),
            ("FF", 1),
            ("PF", 1),
            ("P", 1),
            ("FP", 1),
            ("XF", 1),
            ("FX", 1),
            ("X", 1),
            ("XP", 1),
            ("PX", 1),
        ];
        for (tag, count) in expected {
            assert_eq!(value(&stat, tag), count, "tag {tag}");
        }
    }

    #[test]
    fn absent_population_is_excluded() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("p1a.1", "AC"),
            AlignedSequence::new("p1b.1", "AA"),
        ])
        .unwrap();
        let mut stat =
            PolymorphismStatistics::new(Alphabet::Dna, [vec!["p1a", "p1b"], vec!["p2"]]).unwrap();
        stat.compute(&block).unwrap();
        assert_eq!(value(&stat, "FX"), 1);
        assert_eq!(value(&stat, "PX"), 1);
    }

    #[test]
    fn populations_must_be_two_and_disjoint() {
        assert!(matches!(
            PolymorphismStatistics::new(Alphabet::Dna, [vec!["a"], vec!["b"], vec!["c"]]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            PolymorphismStatistics::new(Alphabet::Dna, [vec!["a", "b"], vec!["b"]]),
            Err(Error::Configuration(_))
        ));
    }
}
