//! Readers producing alignment blocks.

mod maf;

pub use maf::MafReader;
