use std::collections::BTreeSet;
use std::ops::Index;

use super::{RangeCollection, SeqRange, SequenceFeature};

/// Ordered collection of owned features.
///
/// Insertion order is preserved and duplicates are allowed. Every subset
/// query returns a new set holding copies, so results never alias the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<SequenceFeature>,
}

impl FeatureSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Add a copy of `feature` to the set.
    pub fn push(&mut self, feature: &SequenceFeature) {
        self.features.push(feature.clone());
    }

    /// Remove every feature.
    pub fn clear(&mut self) {
        self.features.clear();
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True if the set holds no feature.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature at position `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SequenceFeature> {
        self.features.get(index)
    }

    /// Iterate over features in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SequenceFeature> {
        self.features.iter()
    }

    /// Distinct sequence ids referenced by the features.
    pub fn sequence_ids(&self) -> BTreeSet<&str> {
        self.features.iter().map(SequenceFeature::sequence_id).collect()
    }

    /// Distinct feature types present in the set.
    pub fn types(&self) -> BTreeSet<&str> {
        self.features.iter().map(SequenceFeature::feature_type).collect()
    }

    /// Features of the given type.
    pub fn by_type(&self, feature_type: &str) -> FeatureSet {
        self.filtered(|feature| feature.feature_type() == feature_type)
    }

    /// Features whose type is any of `types`.
    pub fn by_types(&self, types: &[&str]) -> FeatureSet {
        self.filtered(|feature| types.contains(&feature.feature_type()))
    }

    /// Features annotating the given sequence.
    pub fn by_sequence_id(&self, sequence_id: &str) -> FeatureSet {
        self.filtered(|feature| feature.sequence_id() == sequence_id)
    }

    /// Features annotating any of the given sequences.
    pub fn by_sequence_ids(&self, sequence_ids: &[&str]) -> FeatureSet {
        self.filtered(|feature| sequence_ids.contains(&feature.sequence_id()))
    }

    /// Features located in `range`.
    ///
    /// With `complete` set, only features fully included in the range are
    /// kept; otherwise any feature overlapping it is kept. Sequence ids are
    /// not considered.
    ///
    /// Zero-length features overlap nothing, so neither mode returns them.
    pub fn by_range(&self, range: &SeqRange, complete: bool) -> FeatureSet {
        if complete {
            self.filtered(|feature| {
                feature.is_included_in(range) && feature.overlaps_range(range)
            })
        } else {
            self.filtered(|feature| feature.overlaps_range(range))
        }
    }

    /// Union of all feature coordinates.
    pub fn range_collection(&self) -> RangeCollection {
        self.features.iter().map(SequenceFeature::range).collect()
    }

    /// Union of the coordinates of features on one sequence.
    pub fn range_collection_for_sequence(&self, sequence_id: &str) -> RangeCollection {
        self.features
            .iter()
            .filter(|feature| feature.sequence_id() == sequence_id)
            .map(SequenceFeature::range)
            .collect()
    }

    fn filtered<F>(&self, keep: F) -> FeatureSet
    where
        F: Fn(&SequenceFeature) -> bool,
    {
        FeatureSet {
            features: self.features.iter().filter(|f| keep(*f)).cloned().collect(),
        }
    }
}

impl Index<usize> for FeatureSet {
    type Output = SequenceFeature;

    fn index(&self, index: usize) -> &Self::Output {
        &self.features[index]
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a SequenceFeature;
    type IntoIter = std::slice::Iter<'a, SequenceFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl FromIterator<SequenceFeature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = SequenceFeature>>(iter: I) -> Self {
        FeatureSet {
            features: iter.into_iter().collect(),
        }
    }
}

impl Extend<SequenceFeature> for FeatureSet {
    fn extend<I: IntoIterator<Item = SequenceFeature>>(&mut self, iter: I) {
        self.features.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureSet {
        vec![
            SequenceFeature::new("g1", "chr1", "src", "gene", 0, 100, '+'),
            SequenceFeature::new("e1", "chr1", "src", "exon", 10, 40, '+'),
            SequenceFeature::new("e2", "chr1", "src", "exon", 60, 120, '+'),
            SequenceFeature::new("g2", "chr2", "src", "gene", 5, 50, '-'),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn push_stores_a_copy() {
        let mut feature = SequenceFeature::new("x", "chr1", "src", "gene", 1, 2, '.');
        let mut set = FeatureSet::new();
        set.push(&feature);
        feature.set_id("changed");
        assert_eq!(set[0].id(), "x");
    }

    #[test]
    fn subsets_do_not_alias_source() {
        let set = sample();
        let mut genes = set.by_type("gene");
        assert_eq!(genes.len(), 2);
        genes.clear();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn queries_by_type_and_sequence() {
        let set = sample();
        assert_eq!(set.by_types(&["gene", "exon"]).len(), 4);
        assert_eq!(set.by_sequence_id("chr2").len(), 1);
        assert_eq!(set.by_sequence_ids(&["chr1", "chr3"]).len(), 3);
        assert_eq!(set.types().into_iter().collect::<Vec<_>>(), vec!["exon", "gene"]);
        assert_eq!(
            set.sequence_ids().into_iter().collect::<Vec<_>>(),
            vec!["chr1", "chr2"]
        );
    }

    #[test]
    fn range_query_complete_versus_overlap() {
        let set = sample();
        let window = SeqRange::unstranded(0, 50);
        let complete = set.by_range(&window, true);
        let partial = set.by_range(&window, false);
        let ids = |s: &FeatureSet| s.iter().map(|f| f.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&complete), vec!["e1", "g2"]);
        assert_eq!(ids(&partial), vec!["g1", "e1", "g2"]);
    }

    #[test]
    fn zero_length_features_are_never_selected_by_range() {
        let set: FeatureSet = vec![
            SequenceFeature::new("empty", "chr1", "src", "site", 50, 50, '+'),
            SequenceFeature::new("edge", "chr1", "src", "site", 10, 10, '+'),
            SequenceFeature::new("exon", "chr1", "src", "exon", 20, 30, '+'),
        ]
        .into_iter()
        .collect();
        let window = SeqRange::unstranded(10, 100);
        let complete = set.by_range(&window, true);
        let overlapping = set.by_range(&window, false);
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].id(), "exon");
        assert_eq!(overlapping.len(), 1);

        let empty_window = SeqRange::unstranded(50, 50);
        assert!(set.by_range(&empty_window, true).is_empty());
        assert!(set.by_range(&empty_window, false).is_empty());
    }

    #[test]
    fn complete_query_is_within_overlap_query() {
        let set: FeatureSet = (0..20u64)
            .map(|i| {
                let start = i * 7;
                let end = start + i % 4;
                SequenceFeature::new(format!("f{i}"), "chr1", "src", "exon", start, end, '+')
            })
            .collect();
        for (a, b) in [(0, 0), (0, 140), (21, 21), (14, 35), (30, 31)] {
            let window = SeqRange::unstranded(a, b);
            let overlapping = set.by_range(&window, false);
            for feature in &set.by_range(&window, true) {
                assert!(
                    overlapping.iter().any(|f| f == feature),
                    "{} in [{a},{b})",
                    feature.id()
                );
            }
        }
    }

    #[test]
    fn range_collection_merges_coordinates() {
        let set = sample();
        let chr1 = set.range_collection_for_sequence("chr1");
        assert_eq!(chr1.len(), 1);
        assert_eq!(chr1.total_length(), 120);
        assert_eq!(set.range_collection().total_length(), 120);
    }

    #[test]
    fn cloned_set_is_deep() {
        let set = sample();
        let mut copy = set.clone();
        copy.extend([SequenceFeature::new("n", "chr9", "src", "tss", 0, 1, '+')]);
        assert_eq!(set.len(), 4);
        assert_eq!(copy.len(), 5);
        assert_eq!(copy.get(4).map(SequenceFeature::id), Some("n"));
    }
}
