use std::fmt;

/// Strand information attached to a coordinate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    /// Positive strand (`+`).
    Plus,
    /// Negative strand (`-`).
    Minus,
    /// Strand is irrelevant (`.`).
    #[default]
    Unstranded,
    /// Strand is relevant but unknown (`?`).
    UnknownStrandedness,
}

impl Strand {
    /// Parse a strand symbol. Anything other than `+`, `-`, `.` or `?` maps to
    /// [`Strand::Unstranded`].
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            '?' => Strand::UnknownStrandedness,
            _ => Strand::Unstranded,
        }
    }

    /// Single-character representation.
    pub fn symbol(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
            Strand::UnknownStrandedness => '?',
        }
    }

    /// Only `+` and `-` count as stranded.
    pub fn is_stranded(self) -> bool {
        matches!(self, Strand::Plus | Strand::Minus)
    }

    /// Opposite orientation; non-stranded values are returned unchanged.
    pub fn inverted(self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
            other => other,
        }
    }
}

impl From<char> for Strand {
    fn from(symbol: char) -> Self {
        Strand::from_symbol(symbol)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Half-open coordinate range `[start, end)` carrying a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeqRange {
    start: u64,
    end: u64,
    strand: Strand,
}

impl SeqRange {
    /// Build a range from two positions. The positions are reordered if needed
    /// so that `start <= end` always holds.
    pub fn new(a: u64, b: u64, strand: impl Into<Strand>) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
            strand: strand.into(),
        }
    }

    /// Unstranded range.
    pub fn unstranded(a: u64, b: u64) -> Self {
        Self::new(a, b, Strand::Unstranded)
    }

    /// First position, included.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last position, excluded.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Strand of the range.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Number of positions covered.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// True when `start == end`.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for single-position ranges.
    pub fn is_point(&self) -> bool {
        self.len() == 1
    }

    /// True for `+` and `-` strands.
    pub fn is_stranded(&self) -> bool {
        self.strand.is_stranded()
    }

    /// True only for the `-` strand.
    pub fn is_negative_strand(&self) -> bool {
        self.strand == Strand::Minus
    }

    /// Swap `+` and `-`. Unstranded and unknown ranges are left untouched.
    pub fn invert(&mut self) {
        self.strand = self.strand.inverted();
    }

    /// Non-empty intersection test. Touching ranges do not overlap, and an
    /// empty range overlaps nothing. Strand is ignored.
    pub fn overlap(&self, other: &SeqRange) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// True if `other` lies fully within this range.
    pub fn contains(&self, other: &SeqRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if this range lies fully within `other`.
    pub fn is_included_in(&self, other: &SeqRange) -> bool {
        other.contains(self)
    }

    /// Overlap or adjacency, used when merging ranges into a union.
    pub(crate) fn touches(&self, other: &SeqRange) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }
}

impl fmt::Display for SeqRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})({})", self.start, self.end, self.strand)
    }
}
