//! Sequence features and the interval algebra they rely on.
//!
//! Coordinates are 0-based and half-open `[start, end)`: a range with
//! `start == end` is empty and a single-base annotation spans `[12, 13)`.

mod collection;
mod range;
mod record;
mod set;

pub use collection::RangeCollection;
pub use range::{SeqRange, Strand};
pub use record::SequenceFeature;
pub use set::FeatureSet;
