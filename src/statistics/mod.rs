//! Per-block statistics over multiple alignment blocks.
//!
//! Each statistic owns its [`StatResult`] and overwrites it on every call to
//! [`BlockStatistic::compute`]. Results are built on the side and swapped in
//! once the whole block has been processed, so a failed call leaves the
//! previous result readable.

mod block;
mod categorizer;
mod counts;
mod diversity;
mod panel;
mod patterns;
mod polymorphism;
mod result;
mod sites;
mod spectrum;

use std::fmt;

use crate::alignment::AlignmentBlock;
use crate::Result;

pub use block::{AlignmentScore, BlockLength, BlockSize, PairwiseDivergence, SequenceLength};
pub use categorizer::Categorizer;
pub use counts::CharacterCounts;
pub use diversity::SequenceDiversity;
pub use panel::{PanelConfig, StatisticInfo, StatisticKind, StatisticsPanel};
pub use patterns::FourSpeciesPatternCounts;
pub use polymorphism::PolymorphismStatistics;
pub use result::{SimpleStatResult, StatResult, StatValue};
pub use sites::SiteStatistics;
pub use spectrum::SiteFrequencySpectrum;

/// A statistic computed independently on each alignment block.
pub trait BlockStatistic: fmt::Debug + Send {
    /// Short identifier, used as a prefix in tabular output.
    fn short_name(&self) -> String;

    /// Human readable description.
    fn full_name(&self) -> String;

    /// Compute the statistic on `block`, replacing the previous result.
    ///
    /// On error the previous result is left untouched.
    fn compute(&mut self, block: &AlignmentBlock) -> Result<()>;

    /// Result of the last successful call to [`BlockStatistic::compute`].
    fn result(&self) -> &StatResult;

    /// Tags this statistic writes, in reporting order.
    fn supported_tags(&self) -> Vec<String>;

    /// Copy of the statistic, configuration and current result included.
    fn clone_boxed(&self) -> Box<dyn BlockStatistic>;
}

impl Clone for Box<dyn BlockStatistic> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}
