//! # Feature intervals and alignment-block statistics
//!
//! This library provides two cooperating pieces of a genome-alignment
//! toolkit:
//!
//! 1. **Feature algebra**: half-open, stranded coordinate ranges and the
//!    annotated features built on top of them, with subset queries by type,
//!    sequence id and range.
//! 2. **Block statistics**: per-block statistics computed over multiple
//!    alignment (MAF) blocks, restricted to selections of species.
//!
//! ## Statistics
//!
//! Every statistic implements [`BlockStatistic`]. A caller keeps one instance
//! per metric and calls `compute` once per block; each call overwrites the
//! previous result:
//!
//! ```ignore
//! use mafstats::{Alphabet, BlockStatistic, MafReader, SiteStatistics};
//!
//! let mut stats = SiteStatistics::new(Alphabet::Dna, Vec::<String>::new())?;
//! for block in MafReader::new(reader) {
//!     stats.compute(&block?)?;
//!     println!("{}", stats.result().value("NbComplete")?);
//! }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod alignment; // Alignment blocks, alphabets, species projection
pub mod feature; // Stranded ranges and sequence features
pub mod io; // MAF block reader
pub mod statistics; // Per-block statistics and result storage

// Re-exports for convenience
pub use alignment::{
    AlignedSequence, AlignmentBlock, Alphabet, CharacterClass, SiteSummary, SpeciesGroups,
    SpeciesSelection, SubAlignment,
};
pub use feature::{FeatureSet, RangeCollection, SeqRange, SequenceFeature, Strand};
pub use io::MafReader;
pub use statistics::{
    AlignmentScore, BlockLength, BlockSize, BlockStatistic, Categorizer, CharacterCounts,
    FourSpeciesPatternCounts, PairwiseDivergence, PanelConfig, PolymorphismStatistics,
    SequenceDiversity, SequenceLength, SimpleStatResult, SiteFrequencySpectrum, SiteStatistics,
    StatResult, StatValue, StatisticInfo, StatisticKind, StatisticsPanel,
};

use thiserror::Error;

/// Errors raised while configuring or computing statistics.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid statistic configuration (species count, duplicates, overlapping groups).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A value fell outside the range covered by a categorizer.
    #[error("value {value} out of range [{lower}, {upper})")]
    OutOfRange {
        /// Offending value.
        value: f64,
        /// Lowest bound (included).
        lower: f64,
        /// Highest bound (excluded).
        upper: f64,
    },

    /// Requested or written tag is not available.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Block content contradicts what a statistic requires.
    #[error("inconsistent data: {0}")]
    DataInconsistency(String),

    /// Malformed MAF input.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Helper for constructing configuration errors.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Helper for constructing data inconsistency errors.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Error::DataInconsistency(msg.into())
    }

    /// Whether a caller may drop the offending block and keep streaming.
    pub fn is_block_local(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::DataInconsistency(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
