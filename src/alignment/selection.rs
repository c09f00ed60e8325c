use std::collections::HashSet;

use super::{AlignedSequence, AlignmentBlock, Alphabet, SiteSummary};
use crate::{Error, Result};

/// Named subset of species used to restrict a statistic to some rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSelection {
    species: Vec<String>,
    empty_means_all: bool,
}

impl SpeciesSelection {
    /// Select exactly the named species. An empty list selects no row.
    ///
    /// Fails if a species is named twice.
    pub fn new<I, S>(species: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let species: Vec<String> = species.into_iter().map(Into::into).collect();
        if let Some(dup) = first_duplicate(&species) {
            return Err(Error::configuration(format!(
                "species '{dup}' is selected more than once"
            )));
        }
        Ok(Self {
            species,
            empty_means_all: false,
        })
    }

    /// Like [`SpeciesSelection::new`], but an empty list selects every row.
    pub fn all_if_empty<I, S>(species: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(species)?;
        selection.empty_means_all = true;
        Ok(selection)
    }

    /// Select every row of each block.
    pub fn all() -> Self {
        Self {
            species: Vec::new(),
            empty_means_all: true,
        }
    }

    /// Named species, in the order given.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Number of named species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// True if no species is named.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Whether an empty list stands for every species.
    pub fn empty_means_all(&self) -> bool {
        self.empty_means_all
    }

    /// True if the selection shares a species with `other`.
    pub fn intersects(&self, other: &SpeciesSelection) -> bool {
        self.species.iter().any(|s| other.species.contains(s))
    }

    fn selects(&self, species: &str) -> bool {
        (self.species.is_empty() && self.empty_means_all) || self.species.iter().any(|s| s == species)
    }

    /// Restrict `block` to the selected rows, keeping block row order.
    pub fn project<'b>(&self, block: &'b AlignmentBlock) -> SubAlignment<'b> {
        let rows = block
            .sequences()
            .iter()
            .filter(|seq| self.selects(seq.species()))
            .collect();
        SubAlignment::new(rows, block.number_of_sites())
    }
}

fn first_duplicate(species: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    species
        .iter()
        .find(|s| !seen.insert(s.as_str()))
        .map(String::as_str)
}

/// Several pairwise-disjoint species selections, e.g. two populations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesGroups {
    groups: Vec<SpeciesSelection>,
}

impl SpeciesGroups {
    /// Build groups from species lists. Fails on duplicates within a group or
    /// on species shared between groups.
    pub fn new<G, I, S>(groups: G) -> Result<Self>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups = groups
            .into_iter()
            .map(SpeciesSelection::new)
            .collect::<Result<Vec<_>>>()?;
        for (i, left) in groups.iter().enumerate() {
            for right in &groups[i + 1..] {
                if left.intersects(right) {
                    return Err(Error::configuration(
                        "species selections must not overlap".to_string(),
                    ));
                }
            }
        }
        Ok(Self { groups })
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if there is no group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Individual selections.
    pub fn groups(&self) -> &[SpeciesSelection] {
        &self.groups
    }

    /// One sub-alignment per group, all from the same block.
    pub fn project<'b>(&self, block: &'b AlignmentBlock) -> Vec<SubAlignment<'b>> {
        self.groups.iter().map(|group| group.project(block)).collect()
    }
}

/// Rows of a block restricted to a species selection.
///
/// Borrowed from the block and rebuilt for every block.
#[derive(Debug, Clone)]
pub struct SubAlignment<'b> {
    rows: Vec<&'b AlignedSequence>,
    num_sites: usize,
}

impl<'b> SubAlignment<'b> {
    fn new(rows: Vec<&'b AlignedSequence>, block_sites: usize) -> Self {
        let num_sites = if rows.is_empty() { 0 } else { block_sites };
        Self { rows, num_sites }
    }

    /// Selected rows.
    pub fn rows(&self) -> &[&'b AlignedSequence] {
        &self.rows
    }

    /// Number of selected rows.
    pub fn number_of_sequences(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns; zero when no row is selected.
    pub fn number_of_sites(&self) -> usize {
        self.num_sites
    }

    /// Characters of column `site`, one per row.
    pub fn column(&self, site: usize) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().filter_map(move |row| row.char_at(site))
    }

    /// Tallies for column `site`.
    pub fn site_summary(&self, alphabet: Alphabet, site: usize) -> SiteSummary {
        SiteSummary::from_column(alphabet, self.column(site))
    }

    /// Tallies for every column, in site order.
    pub fn site_summaries(&self, alphabet: Alphabet) -> impl Iterator<Item = SiteSummary> + '_ {
        (0..self.num_sites).map(move |site| self.site_summary(alphabet, site))
    }
}
