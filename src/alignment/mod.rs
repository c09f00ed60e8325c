//! Multiple alignment blocks and the species projections computed on them.
//!
//! A block is an ordered list of aligned rows of equal length, each tagged
//! with a species identifier. Statistics never look at a whole block
//! directly: they project it onto a [`SpeciesSelection`] (or a pair of
//! disjoint selections) and then summarise the resulting columns.

mod alphabet;
mod block;
mod selection;
mod site;

pub use alphabet::{Alphabet, CharacterClass, NUM_STATES};
pub use block::{AlignedSequence, AlignmentBlock};
pub use selection::{SpeciesGroups, SpeciesSelection, SubAlignment};
pub use site::SiteSummary;
