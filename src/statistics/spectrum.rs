use super::block::unique_row;
use super::{BlockStatistic, Categorizer, StatResult};
use crate::alignment::{AlignmentBlock, Alphabet, SiteSummary, SpeciesSelection};
use crate::{Error, Result};

const IGNORED_TAG: &str = "NbIgnored";

/// Site frequency spectrum of the ingroup rows of a block.
///
/// Without an outgroup the ancestral state is unknown, so each biallelic
/// site is binned by the count of its least frequent state: `10000` and
/// `11110` land in the same bin. With an outgroup, the outgroup character
/// is taken as ancestral and sites are binned by the number of derived
/// states. Monomorphic sites have a value of 0.
///
/// Sites that cannot be placed are reported under `NbIgnored`: columns with a
/// gap or unresolved ingroup character, more than two states, or (with an
/// outgroup) an unusable or absent outgroup character. Bins are reported as
/// `Bin1`..`BinN`.
#[derive(Debug, Clone)]
pub struct SiteFrequencySpectrum {
    alphabet: Alphabet,
    categorizer: Categorizer,
    ingroup: SpeciesSelection,
    outgroup: Option<String>,
    result: StatResult,
}

impl SiteFrequencySpectrum {
    /// Create the statistic. `bounds` defines the bins, see [`Categorizer`].
    pub fn new<I, S>(
        alphabet: Alphabet,
        bounds: Vec<f64>,
        ingroup: I,
        outgroup: Option<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ingroup = SpeciesSelection::new(ingroup)?;
        if let Some(out) = &outgroup {
            if ingroup.species().contains(out) {
                return Err(Error::configuration(format!(
                    "outgroup {out} is also part of the ingroup"
                )));
            }
        }
        Ok(Self {
            alphabet,
            categorizer: Categorizer::new(bounds)?,
            ingroup,
            outgroup,
            result: StatResult::new(),
        })
    }

    fn bin_tag(category: usize) -> String {
        format!("Bin{category}")
    }

    /// Frequency value for an ingroup site, `None` when the site is ignored.
    fn site_value(&self, site: &SiteSummary, ancestral: Option<Option<usize>>) -> Option<u32> {
        if !site.is_complete() || site.distinct_states() > 2 {
            return None;
        }
        match ancestral {
            None => Some(site.minor_allele_count().unwrap_or(0)),
            Some(None) => None,
            Some(Some(state)) => {
                let ancestral_count = site.state_counts[state];
                if site.distinct_states() == 2 && ancestral_count == 0 {
                    return None;
                }
                Some(site.resolved() - ancestral_count)
            }
        }
    }
}

impl BlockStatistic for SiteFrequencySpectrum {
    fn short_name(&self) -> String {
        "SiteFrequencySpectrum".to_string()
    }

    fn full_name(&self) -> String {
        "Site frequency spectrum.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let alignment = self.ingroup.project(block);
        let outgroup_row = match &self.outgroup {
            Some(species) => Some(unique_row(block, species)?),
            None => None,
        };

        let mut counts = vec![0u64; self.categorizer.number_of_categories()];
        let mut ignored = 0u64;
        for (idx, site) in alignment.site_summaries(self.alphabet).enumerate() {
            // Outer `Some` when polarised; inner `None` when the outgroup gives no state.
            let ancestral = outgroup_row.map(|row| {
                row.and_then(|r| r.char_at(idx))
                    .and_then(|c| self.alphabet.classify(c).state())
            });
            match self.site_value(&site, ancestral) {
                Some(value) => {
                    let category = self.categorizer.category(f64::from(value))?;
                    counts[category - 1] += 1;
                }
                None => ignored += 1,
            }
        }

        let mut result = StatResult::new();
        for (idx, count) in counts.into_iter().enumerate() {
            result.set_value(Self::bin_tag(idx + 1), count);
        }
        result.set_value(IGNORED_TAG, ignored);
        self.result = result;
        Ok(())
    }

    fn result(&self) -> &StatResult {
        &self.result
    }

    fn supported_tags(&self) -> Vec<String> {
        (1..=self.categorizer.number_of_categories())
            .map(Self::bin_tag)
            .chain(std::iter::once(IGNORED_TAG.to_string()))
            .collect()
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}
