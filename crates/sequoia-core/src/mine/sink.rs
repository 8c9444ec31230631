//! Module: mine::sink
//! Responsibility: the reporting boundary — the sink trait the engine
//! drives and the in-memory reference sink.
//! Does not own: closedness decisions, support thresholds, or pattern
//! ordering; the engine settles those before calling in.
//! Boundary: `min_len` filtering belongs to sinks, never to the core.

use crate::{
    db::{ItemId, Support},
    error::InternalError,
    mine::MineConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// SinkError
/// A sink refused an emission; the mining run unwinds without further
/// reports.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SinkError> for InternalError {
    fn from(err: SinkError) -> Self {
        Self::reporter(err.message)
    }
}

///
/// PatternSink
///
/// Output boundary of the engine. The engine builds the sink's prefix
/// incrementally — `add` when an item is committed, `remove(1)` when the
/// item loop leaves the slot — keeping the pairing balanced along every
/// recursion branch, and calls `report` whenever the current prefix is a
/// reportable pattern. The empty sequence is reported with no preceding
/// `add`.
///

pub trait PatternSink {
    /// Append `item` to the prefix; `support` is the support of the
    /// extended prefix.
    fn add(&mut self, item: ItemId, support: Support) -> Result<(), SinkError>;

    /// Drop the last `count` prefix items.
    fn remove(&mut self, count: usize);

    /// Emit the current prefix. Weighted mining passes per-position
    /// weight sums (`weight_sums[k] = Σ tx_weight · item_weight`); the
    /// sink divides by `support` for the mean. Unweighted mining passes
    /// `None`.
    fn report(&mut self, support: Support, weight_sums: Option<&[f64]>) -> Result<(), SinkError>;
}

///
/// Pattern
/// One reported pattern: its items, its support, and (weighted flavor)
/// the mean item weight per position.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub items: Vec<ItemId>,
    pub support: Support,
    pub mean_weights: Option<Vec<f64>>,
}

///
/// MemorySink
///
/// Collecting sink and the reference collaborator of the test suite.
/// Applies the `min_len` gate the engine deliberately leaves to
/// reporters.
///

#[derive(Debug, Default)]
pub struct MemorySink {
    min_len: usize,
    prefix: Vec<ItemId>,
    patterns: Vec<Pattern>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_len(min_len: usize) -> Self {
        Self {
            min_len,
            ..Self::default()
        }
    }

    /// Sink honoring the reporter-side `min_len` of a configuration.
    #[must_use]
    pub fn for_config(config: &MineConfig) -> Self {
        Self::with_min_len(config.min_len)
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    /// Depth of the incrementally built prefix (diagnostic).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.prefix.len()
    }
}

impl PatternSink for MemorySink {
    fn add(&mut self, item: ItemId, _support: Support) -> Result<(), SinkError> {
        self.prefix.push(item);

        Ok(())
    }

    fn remove(&mut self, count: usize) {
        let keep = self.prefix.len().saturating_sub(count);
        self.prefix.truncate(keep);
    }

    fn report(&mut self, support: Support, weight_sums: Option<&[f64]>) -> Result<(), SinkError> {
        if self.prefix.len() < self.min_len {
            return Ok(());
        }
        let mean_weights = weight_sums
            .map(|sums| sums.iter().map(|sum| sum / support as f64).collect());
        self.patterns.push(Pattern {
            items: self.prefix.clone(),
            support,
            mean_weights,
        });

        Ok(())
    }
}

///
/// TESTS
///
