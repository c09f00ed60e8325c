use super::SeqRange;

/// Union of half-open ranges, kept sorted and non-overlapping.
///
/// Adding a range merges it with every range it overlaps or touches, so
/// `[0, 5)` and `[5, 9)` collapse into `[0, 9)`. Strands are not tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeCollection {
    ranges: Vec<SeqRange>,
}

impl RangeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a range, merging as needed. Empty ranges are ignored.
    pub fn add(&mut self, range: SeqRange) {
        if range.is_empty() {
            return;
        }
        let mut merged = SeqRange::unstranded(range.start(), range.end());
        // First range that could touch `merged`.
        let first = self.ranges.partition_point(|r| r.end() < merged.start());
        let mut last = first;
        while last < self.ranges.len() && self.ranges[last].touches(&merged) {
            let current = self.ranges[last];
            merged = SeqRange::unstranded(
                current.start().min(merged.start()),
                current.end().max(merged.end()),
            );
            last += 1;
        }
        self.ranges.splice(first..last, std::iter::once(merged));
    }

    /// Number of disjoint ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of positions covered by the union.
    pub fn total_length(&self) -> u64 {
        self.ranges.iter().map(SeqRange::len).sum()
    }

    /// Whether `position` falls inside any range.
    pub fn contains_position(&self, position: u64) -> bool {
        let idx = self.ranges.partition_point(|r| r.end() <= position);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start() <= position)
    }

    /// Iterate over the disjoint ranges in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeqRange> {
        self.ranges.iter()
    }
}

impl FromIterator<SeqRange> for RangeCollection {
    fn from_iter<I: IntoIterator<Item = SeqRange>>(iter: I) -> Self {
        let mut collection = RangeCollection::new();
        for range in iter {
            collection.add(range);
        }
        collection
    }
}
