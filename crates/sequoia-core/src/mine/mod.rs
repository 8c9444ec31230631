//! The mining engine: configuration, driver, projection recursion,
//! arenas, closedness oracle, and the reporting boundary.

pub(crate) mod closed;
pub(crate) mod extension;
pub(crate) mod occurrence;
pub(crate) mod project;
pub(crate) mod sink;
pub(crate) mod trace;


// re-exports
pub use sink::{MemorySink, Pattern, PatternSink, SinkError};
pub use trace::{MineTraceEvent, MineTraceSink};

use crate::{
    db::{Support, Token, TransactionDb},
    error::InternalError,
    mine::{extension::ExtensionArena, project::Projector},
};
use serde::{Deserialize, Serialize};

///
/// Target
/// Which pattern family a run reports.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Every frequent pattern.
    #[default]
    All,
    /// Only frequent patterns no one-item extension of which keeps the
    /// full support.
    Closed,
}

///
/// MineConfig
///
/// Options the core recognizes. `min_len` belongs to reporters (see
/// `MemorySink::for_config`); the core carries it untouched.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MineConfig {
    pub target: Target,
    /// Minimum support; clamped to at least 1.
    pub min_support: Support,
    /// Minimum reported pattern length; enforced by sinks, not the core.
    pub min_len: usize,
    /// Maximum reported pattern length; the recursion never descends
    /// past it.
    pub max_len: usize,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            target: Target::All,
            min_support: 1,
            min_len: 1,
            max_len: usize::MAX,
        }
    }
}

impl MineConfig {
    #[must_use]
    pub fn all(min_support: Support) -> Self {
        Self {
            min_support,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn closed(min_support: Support) -> Self {
        Self {
            target: Target::Closed,
            min_support,
            ..Self::default()
        }
    }

    fn validated(self) -> Result<Self, InternalError> {
        if self.min_len > self.max_len {
            return Err(InternalError::config(format!(
                "min_len {} exceeds max_len {}",
                self.min_len, self.max_len
            )));
        }

        Ok(Self {
            min_support: self.min_support.max(1),
            ..self
        })
    }
}

///
/// MineOutcome
/// Aggregate counters of one mining run; purely observational.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MineOutcome {
    /// Patterns emitted to the sink (including the empty sequence).
    pub reported: u64,
    /// Recursion frames entered.
    pub frames: u64,
    /// Extensions that met the support threshold.
    pub extensions_scanned: u64,
    /// Extensions discarded by the closedness oracle.
    pub gap_rejections: u64,
    /// Maximum support among single-item patterns.
    pub max_unit_support: Support,
}

/// Mine `db` into `sink` under `config`.
pub fn mine<T, S>(
    db: &TransactionDb<T>,
    config: &MineConfig,
    sink: &mut S,
) -> Result<MineOutcome, InternalError>
where
    T: Token,
    S: PatternSink + ?Sized,
{
    mine_with_trace(db, config, sink, None)
}

/// Mine with an optional trace sink observing the run.
pub fn mine_with_trace<T, S>(
    db: &TransactionDb<T>,
    config: &MineConfig,
    sink: &mut S,
    trace: Option<&dyn MineTraceSink>,
) -> Result<MineOutcome, InternalError>
where
    T: Token,
    S: PatternSink + ?Sized,
{
    let config = config.validated()?;
    trace::emit(
        trace,
        MineTraceEvent::Start {
            transactions: db.transaction_count(),
            items: db.item_count(),
            total_weight: db.total_weight(),
        },
    );

    let mut outcome = MineOutcome::default();
    if db.total_weight() < config.min_support {
        trace::emit(
            trace,
            MineTraceEvent::Finish {
                reported: 0,
                max_unit_support: 0,
            },
        );
        return Ok(outcome);
    }

    if db.item_count() == 0 {
        // Empty alphabet: only the weighted flavor reports the empty
        // sequence here.
        if T::WEIGHTED {
            sink.report(db.total_weight(), Some(&[]))?;
            outcome.reported = 1;
        }
        trace::emit(
            trace,
            MineTraceEvent::Finish {
                reported: outcome.reported,
                max_unit_support: 0,
            },
        );
        return Ok(outcome);
    }

    let mut max: Support = 0;
    {
        let mut projector = Projector::new(db, sink, trace, config)?;
        if config.max_len >= 1 && db.extent() > 0 {
            let mut initial = ExtensionArena::with_capacity(db.item_count(), db.extent())?;
            initial.fill_initial(db);
            max = projector.recurse(&initial, db.extent(), 0)?;
        }
        outcome = projector.into_stats();
    }
    outcome.max_unit_support = max;

    // The empty sequence is closed exactly when no single item keeps the
    // whole database weight; emitted only on error-free runs.
    if config.target != Target::Closed || max < db.total_weight() {
        let sums: Option<&[f64]> = if T::WEIGHTED { Some(&[]) } else { None };
        sink.report(db.total_weight(), sums)?;
        outcome.reported += 1;
    }

    trace::emit(
        trace,
        MineTraceEvent::Finish {
            reported: outcome.reported,
            max_unit_support: max,
        },
    );

    Ok(outcome)
}
