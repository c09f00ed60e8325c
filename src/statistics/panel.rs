use std::fmt;
use std::str::FromStr;

use super::{
    AlignmentScore, BlockLength, BlockSize, BlockStatistic, CharacterCounts,
    FourSpeciesPatternCounts, PairwiseDivergence, PolymorphismStatistics, SequenceDiversity,
    SequenceLength, SiteFrequencySpectrum, SiteStatistics, StatValue,
};
use crate::alignment::{AlignmentBlock, Alphabet};
use crate::{Error, Result};

/// Statistics that can be requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    /// [`BlockSize`]
    BlockSize,
    /// [`BlockLength`]
    BlockLength,
    /// [`AlignmentScore`]
    AlignmentScore,
    /// [`SequenceLength`], one per configured species.
    SequenceLength,
    /// [`PairwiseDivergence`]
    Divergence,
    /// [`CharacterCounts`]
    Counts,
    /// [`SiteFrequencySpectrum`]
    SiteFrequencySpectrum,
    /// [`FourSpeciesPatternCounts`]
    FourSpecies,
    /// [`SiteStatistics`]
    Sites,
    /// [`PolymorphismStatistics`]
    Polymorphism,
    /// [`SequenceDiversity`]
    Diversity,
}

impl StatisticKind {
    /// Every kind, in the order they are documented.
    pub const ALL: [StatisticKind; 11] = [
        StatisticKind::BlockSize,
        StatisticKind::BlockLength,
        StatisticKind::AlignmentScore,
        StatisticKind::SequenceLength,
        StatisticKind::Divergence,
        StatisticKind::Counts,
        StatisticKind::SiteFrequencySpectrum,
        StatisticKind::FourSpecies,
        StatisticKind::Sites,
        StatisticKind::Polymorphism,
        StatisticKind::Diversity,
    ];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            StatisticKind::BlockSize => "block-size",
            StatisticKind::BlockLength => "block-length",
            StatisticKind::AlignmentScore => "aln-score",
            StatisticKind::SequenceLength => "seq-length",
            StatisticKind::Divergence => "divergence",
            StatisticKind::Counts => "counts",
            StatisticKind::SiteFrequencySpectrum => "sfs",
            StatisticKind::FourSpecies => "four-species",
            StatisticKind::Sites => "sites",
            StatisticKind::Polymorphism => "polymorphism",
            StatisticKind::Diversity => "diversity",
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatisticKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        StatisticKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::configuration(format!("unknown statistic '{s}'")))
    }
}

/// Parameters shared by the statistics of a panel.
///
/// Built with the `with_*` methods and turned into a [`StatisticsPanel`] by
/// [`PanelConfig::build`], which validates every statistic up front.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Statistics to compute, in output order.
    pub kinds: Vec<StatisticKind>,
    /// Alphabet used to classify characters.
    pub alphabet: Alphabet,
    /// Species restricting counts, site and diversity statistics; the SFS
    /// ingroup; the four species of pattern counts. Empty means all rows
    /// where that is meaningful.
    pub species: Vec<String>,
    /// Two populations for polymorphism statistics.
    pub populations: Option<(Vec<String>, Vec<String>)>,
    /// Outgroup polarising the site frequency spectrum.
    pub outgroup: Option<String>,
    /// SFS bin bounds. Empty means one bin per derived count, the last one
    /// open-ended.
    pub sfs_bounds: Vec<f64>,
    /// Species pair for pairwise divergence.
    pub pair: Option<(String, String)>,
    /// Species to report sequence lengths for.
    pub length_species: Vec<String>,
    /// Suffix distinguishing character counts in output.
    pub suffix: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelConfig {
    /// Empty configuration over DNA.
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            alphabet: Alphabet::Dna,
            species: Vec::new(),
            populations: None,
            outgroup: None,
            sfs_bounds: Vec::new(),
            pair: None,
            length_species: Vec::new(),
            suffix: String::new(),
        }
    }

    /// Add a statistic.
    pub fn with_statistic(mut self, kind: StatisticKind) -> Self {
        self.kinds.push(kind);
        self
    }

    /// Set the alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set the species list.
    pub fn with_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species = species.into_iter().map(Into::into).collect();
        self
    }

    /// Set the two populations.
    pub fn with_populations<I, J, S, T>(mut self, first: I, second: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.populations = Some((
            first.into_iter().map(Into::into).collect(),
            second.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the SFS outgroup.
    pub fn with_outgroup(mut self, outgroup: impl Into<String>) -> Self {
        self.outgroup = Some(outgroup.into());
        self
    }

    /// Set the SFS bin bounds.
    pub fn with_sfs_bounds(mut self, bounds: Vec<f64>) -> Self {
        self.sfs_bounds = bounds;
        self
    }

    /// Set the species pair for divergence.
    pub fn with_pair(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.pair = Some((first.into(), second.into()));
        self
    }

    /// Set the species whose sequence lengths are reported.
    pub fn with_length_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.length_species = species.into_iter().map(Into::into).collect();
        self
    }

    /// Set the character counts suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    fn default_sfs_bounds(&self) -> Vec<f64> {
        // Bins [k, k+1) for counts below n, then [n, inf): paralogous rows can
        // push a count past the number of species.
        let n = self.species.len();
        (0..=n)
            .map(|k| k as f64)
            .chain(std::iter::once(f64::INFINITY))
            .collect()
    }

    /// Validate the configuration and instantiate its statistics.
    pub fn build(&self) -> Result<StatisticsPanel> {
        let mut panel = StatisticsPanel::new();
        let alphabet = self.alphabet;
        for &kind in &self.kinds {
            match kind {
                StatisticKind::BlockSize => panel.add(BlockSize::new()),
                StatisticKind::BlockLength => panel.add(BlockLength::new()),
                StatisticKind::AlignmentScore => panel.add(AlignmentScore::new()),
                StatisticKind::SequenceLength => {
                    if self.length_species.is_empty() {
                        return Err(Error::configuration(
                            "sequence length needs at least one species",
                        ));
                    }
                    for species in &self.length_species {
                        panel.add(SequenceLength::new(species.clone()));
                    }
                }
                StatisticKind::Divergence => {
                    let (first, second) = self.pair.clone().ok_or_else(|| {
                        Error::configuration("pairwise divergence needs a species pair")
                    })?;
                    panel.add(PairwiseDivergence::new(alphabet, first, second)?);
                }
                StatisticKind::Counts => panel.add(CharacterCounts::new(
                    alphabet,
                    self.species.iter().cloned(),
                    self.suffix.clone(),
                )?),
                StatisticKind::SiteFrequencySpectrum => {
                    if self.species.is_empty() {
                        return Err(Error::configuration(
                            "site frequency spectrum needs an ingroup",
                        ));
                    }
                    let bounds = if self.sfs_bounds.is_empty() {
                        self.default_sfs_bounds()
                    } else {
                        self.sfs_bounds.clone()
                    };
                    panel.add(SiteFrequencySpectrum::new(
                        alphabet,
                        bounds,
                        self.species.iter().cloned(),
                        self.outgroup.clone(),
                    )?);
                }
                StatisticKind::FourSpecies => panel.add(FourSpeciesPatternCounts::new(
                    alphabet,
                    self.species.iter().cloned(),
                )?),
                StatisticKind::Sites => {
                    panel.add(SiteStatistics::new(alphabet, self.species.iter().cloned())?)
                }
                StatisticKind::Polymorphism => {
                    let (first, second) = self.populations.clone().ok_or_else(|| {
                        Error::configuration("polymorphism statistics need two populations")
                    })?;
                    panel.add(PolymorphismStatistics::new(alphabet, [first, second])?);
                }
                StatisticKind::Diversity => panel.add(SequenceDiversity::new(
                    alphabet,
                    self.species.iter().cloned(),
                )?),
            }
        }
        tracing::debug!(
            statistics = panel.len(),
            alphabet = %alphabet,
            "statistics panel built"
        );
        Ok(panel)
    }
}

/// Identity of a statistic in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticInfo {
    /// Short name, used as the output prefix.
    pub short_name: String,
    /// Description.
    pub full_name: String,
}

/// Ordered set of statistics computed together on each block.
#[derive(Debug, Clone, Default)]
pub struct StatisticsPanel {
    statistics: Vec<Box<dyn BlockStatistic>>,
}

impl StatisticsPanel {
    /// Empty panel.
    pub fn new() -> Self {
        Self {
            statistics: Vec::new(),
        }
    }

    /// Append a statistic.
    pub fn add<S>(&mut self, statistic: S)
    where
        S: BlockStatistic + 'static,
    {
        self.statistics.push(Box::new(statistic));
    }

    /// Number of statistics.
    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    /// True if the panel holds no statistic.
    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }

    /// Statistics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn BlockStatistic> + '_ {
        self.statistics.iter().map(|s| s.as_ref())
    }

    /// Identities of every statistic.
    pub fn list(&self) -> Vec<StatisticInfo> {
        self.statistics
            .iter()
            .map(|s| StatisticInfo {
                short_name: s.short_name(),
                full_name: s.full_name(),
            })
            .collect()
    }

    /// Compute every statistic on `block`, stopping at the first failure.
    ///
    /// Results are committed together: after a failure every statistic
    /// still holds its result for the previous block.
    pub fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let mut staged = self.statistics.clone();
        for statistic in &mut staged {
            statistic.compute(block)?;
        }
        self.statistics = staged;
        tracing::trace!(
            rows = block.number_of_sequences(),
            sites = block.number_of_sites(),
            "panel computed on block"
        );
        Ok(())
    }

    /// Current values as `short_name.tag` cells, in panel then tag order.
    pub fn cells(&self) -> Vec<(String, StatValue)> {
        let mut cells = Vec::new();
        for statistic in &self.statistics {
            let name = statistic.short_name();
            let result = statistic.result();
            for tag in statistic.supported_tags() {
                if let Ok(value) = result.value(&tag) {
                    cells.push((format!("{name}.{tag}"), value));
                }
            }
        }
        cells
    }

    /// One tab separated line: `label` then every cell as `name=value`.
    ///
    /// Floating point values use `precision` decimals; NaN prints as `NA`.
    pub fn tsv_row(&self, label: &str, precision: usize) -> String {
        let mut row = label.to_string();
        for (name, value) in self.cells() {
            row.push_str(&format!("\t{name}={value:.precision$}"));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignedSequence;
    use test_case::test_case;

    #[test_case("block-size" => StatisticKind::BlockSize ; "block size")]
    #[test_case("SFS" => StatisticKind::SiteFrequencySpectrum ; "case insensitive")]
    #[test_case(" four-species " => StatisticKind::FourSpecies ; "trimmed")]
    #[test_case("diversity" => StatisticKind::Diversity ; "diversity")]
    fn kinds_parse_from_names(name: &str) -> StatisticKind {
        name.parse().unwrap()
    }

    #[test]
    fn names_round_trip_through_display() {
        for kind in StatisticKind::ALL {
            assert_eq!(kind.to_string().parse::<StatisticKind>().unwrap(), kind);
        }
        assert!(matches!(
            "nope".parse::<StatisticKind>(),
            Err(Error::Configuration(_))
        ));
    }

    fn block() -> AlignmentBlock {
        AlignmentBlock::from_sequences([
            AlignedSequence::new("hg.chr1", "ACGT"),
            AlignedSequence::new("pt.chr1", "ACGA"),
            AlignedSequence::new("mm.chr3", "AC-T"),
        ])
        .unwrap()
        .with_score(10.0)
    }

    #[test]
    fn panel_reports_prefixed_cells() {
        let mut panel = PanelConfig::new()
            .with_statistic(StatisticKind::BlockSize)
            .with_statistic(StatisticKind::Sites)
            .with_statistic(StatisticKind::Divergence)
            .with_pair("hg", "pt")
            .build()
            .unwrap();
        assert_eq!(panel.len(), 3);
        panel.compute(&block()).unwrap();
        let cells = panel.cells();
        assert_eq!(cells[0], ("BlockSize.BlockSize".to_string(), StatValue::Unsigned(3)));
        assert!(cells.contains(&(
            "SiteStatistics.NbComplete".to_string(),
            StatValue::Unsigned(3)
        )));
        assert!(cells.contains(&("Div.hg-pt.Divergence".to_string(), StatValue::Float(25.0))));
    }

    #[test]
    fn configuration_errors_surface_at_build() {
        let missing_pair = PanelConfig::new().with_statistic(StatisticKind::Divergence);
        assert!(matches!(missing_pair.build(), Err(Error::Configuration(_))));

        let three_species = PanelConfig::new()
            .with_statistic(StatisticKind::FourSpecies)
            .with_species(["a", "b", "c"]);
        assert!(matches!(three_species.build(), Err(Error::Configuration(_))));

        let overlapping = PanelConfig::new()
            .with_statistic(StatisticKind::Polymorphism)
            .with_populations(["a", "b"], ["b"]);
        assert!(matches!(overlapping.build(), Err(Error::Configuration(_))));
    }

    #[test]
    fn default_sfs_bounds_cover_every_count() {
        let mut panel = PanelConfig::new()
            .with_statistic(StatisticKind::SiteFrequencySpectrum)
            .with_species(["hg", "pt", "mm"])
            .build()
            .unwrap();
        panel.compute(&block()).unwrap();
        let tags: Vec<String> = panel.iter().flat_map(|s| s.supported_tags()).collect();
        assert_eq!(tags, vec!["Bin1", "Bin2", "Bin3", "Bin4", "NbIgnored"]);
    }

    #[test]
    fn default_sfs_bounds_absorb_paralogous_rows() {
        let block = AlignmentBlock::from_sequences([
            AlignedSequence::new("a.chr1", "AC"),
            AlignedSequence::new("a.chr7", "AC"),
            AlignedSequence::new("b.chr1", "AA"),
            AlignedSequence::new("out.chr1", "GA"),
        ])
        .unwrap();
        let mut panel = PanelConfig::new()
            .with_statistic(StatisticKind::SiteFrequencySpectrum)
            .with_species(["a", "b"])
            .with_outgroup("out")
            .build()
            .unwrap();
        panel.compute(&block).unwrap();
        let cells = panel.cells();
        // Column 1: three derived rows for two species. Column 2: two derived.
        assert_eq!(
            cells,
            vec![
                ("SiteFrequencySpectrum.Bin1".to_string(), StatValue::Unsigned(0)),
                ("SiteFrequencySpectrum.Bin2".to_string(), StatValue::Unsigned(0)),
                ("SiteFrequencySpectrum.Bin3".to_string(), StatValue::Unsigned(2)),
                ("SiteFrequencySpectrum.NbIgnored".to_string(), StatValue::Unsigned(0)),
            ]
        );
    }

    #[test]
    fn failed_block_leaves_every_statistic_on_previous_block() {
        let mut panel = PanelConfig::new()
            .with_statistic(StatisticKind::BlockSize)
            .with_statistic(StatisticKind::SiteFrequencySpectrum)
            .with_species(["hg", "pt"])
            .with_sfs_bounds(vec![0.0, 1.0])
            .build()
            .unwrap();
        let monomorphic = AlignmentBlock::from_sequences([
            AlignedSequence::new("hg.chr1", "ACG"),
            AlignedSequence::new("pt.chr1", "ACG"),
            AlignedSequence::new("mm.chr3", "AC-"),
        ])
        .unwrap();
        panel.compute(&monomorphic).unwrap();
        let before = panel.cells();

        let polymorphic = AlignmentBlock::from_sequences([
            AlignedSequence::new("hg.chr1", "A"),
            AlignedSequence::new("pt.chr1", "C"),
            AlignedSequence::new("mm.chr3", "A"),
            AlignedSequence::new("rn.chr3", "A"),
        ])
        .unwrap();
        let err = panel.compute(&polymorphic).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
        assert_eq!(panel.cells(), before);
        assert_eq!(before[0].1, StatValue::Unsigned(3));
    }

    #[test]
    fn list_exposes_identities() {
        let panel = PanelConfig::new()
            .with_statistic(StatisticKind::SequenceLength)
            .with_length_species(["hg", "mm"])
            .build()
            .unwrap();
        let names: Vec<String> = panel.list().into_iter().map(|i| i.short_name).collect();
        assert_eq!(names, vec!["SequenceLengthForhg", "SequenceLengthFormm"]);
    }

    #[test]
    fn tsv_row_formats_values() {
        let mut panel = PanelConfig::new()
            .with_statistic(StatisticKind::BlockSize)
            .with_statistic(StatisticKind::AlignmentScore)
            .build()
            .unwrap();
        panel.compute(&block()).unwrap();
        assert_eq!(
            panel.tsv_row("7", 2),
            "7\tBlockSize.BlockSize=3\tAlnScore.AlnScore=10.00"
        );
    }
}
