use std::collections::{BTreeMap, BTreeSet};

use super::{SeqRange, Strand};

/// Score value meaning "no score available".
pub(crate) const NO_SCORE: f64 = -1.0;

/// A named, typed annotation on a sequence.
///
/// Features own their attribute map; cloning a feature deep-copies it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceFeature {
    id: String,
    sequence_id: String,
    source: String,
    feature_type: String,
    range: SeqRange,
    score: f64,
    attributes: BTreeMap<String, String>,
}

impl SequenceFeature {
    /// Construct a feature without score (`score() == -1`).
    pub fn new(
        id: impl Into<String>,
        sequence_id: impl Into<String>,
        source: impl Into<String>,
        feature_type: impl Into<String>,
        start: u64,
        end: u64,
        strand: impl Into<Strand>,
    ) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            source: source.into(),
            feature_type: feature_type.into(),
            range: SeqRange::new(start, end, strand),
            score: NO_SCORE,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style score assignment.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Feature identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the feature identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Identifier of the annotated sequence.
    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    /// Set the identifier of the annotated sequence.
    pub fn set_sequence_id(&mut self, id: impl Into<String>) {
        self.sequence_id = id.into();
    }

    /// Program or procedure that produced the feature.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Set the feature source.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Feature type (e.g. `mRNA`, `exon`).
    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    /// Set the feature type.
    pub fn set_feature_type(&mut self, feature_type: impl Into<String>) {
        self.feature_type = feature_type.into();
    }

    /// Coordinates of the feature.
    pub fn range(&self) -> SeqRange {
        self.range
    }

    /// First position, included.
    pub fn start(&self) -> u64 {
        self.range.start()
    }

    /// Last position, excluded.
    pub fn end(&self) -> u64 {
        self.range.end()
    }

    /// Number of positions covered.
    pub fn len(&self) -> u64 {
        self.range.len()
    }

    /// True when `start == end`.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// True for single-position features.
    pub fn is_point(&self) -> bool {
        self.range.is_point()
    }

    /// True on `+` or `-` strand.
    pub fn is_stranded(&self) -> bool {
        self.range.is_stranded()
    }

    /// True on the `-` strand.
    pub fn is_negative_strand(&self) -> bool {
        self.range.is_negative_strand()
    }

    /// Flip the orientation of the feature.
    pub fn invert(&mut self) {
        self.range.invert();
    }

    /// Score (e.g. an E-value), `-1` when unset.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether a score was assigned.
    pub fn has_score(&self) -> bool {
        self.score != NO_SCORE
    }

    /// Set the score.
    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    /// Overlap with another feature; features on different sequences never overlap.
    pub fn overlaps_feature(&self, other: &SequenceFeature) -> bool {
        self.sequence_id == other.sequence_id && self.range.overlap(&other.range)
    }

    /// Non-empty intersection with `range`.
    pub fn overlaps_range(&self, range: &SeqRange) -> bool {
        self.range.overlap(range)
    }

    /// True if the feature fully contains `range`.
    pub fn includes(&self, range: &SeqRange) -> bool {
        self.range.contains(range)
    }

    /// True if the feature lies fully within `range`.
    pub fn is_included_in(&self, range: &SeqRange) -> bool {
        self.range.is_included_in(range)
    }

    /// Attribute value, or `None` when the attribute is not set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Mutable attribute value; an empty entry is created if needed.
    pub fn attribute_mut(&mut self, name: &str) -> &mut String {
        self.attributes.entry(name.to_string()).or_default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its value if it was set.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Names of all attributes set on the feature.
    pub fn attribute_names(&self) -> BTreeSet<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }
}
