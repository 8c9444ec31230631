//! Module: mine::project
//! Responsibility: the projection recursion — commit, closedness gate,
//! conditional refill, descent, and reporting.
//! Does not own: arena layout (mine::extension) or reporting policy
//! (mine::sink).
//! Boundary: a frame reporting length `n` is entered only when
//! `n <= max_len`; it prepares a conditional arena only when
//! `n < max_len`, so no report ever exceeds the length cap.

use crate::{
    db::{ItemId, Support, Token, TransactionDb},
    error::{ErrorOrigin, InternalError},
    mine::{
        MineConfig, MineOutcome, Target,
        closed::GapOracle,
        extension::{ExtensionArena, OccExt},
        occurrence::OccurrenceArena,
        sink::PatternSink,
        trace::{self, MineTraceEvent, MineTraceSink},
    },
};

///
/// Projector
///
/// Owns the run-scoped state of one mining call: the occurrence arena,
/// the oracle scratch, the weight-sum scratch, and the borrowed sink.
/// Conditional extension arenas are frame-local; the recursion drops
/// them on every return path.
///

pub(crate) struct Projector<'run, T, S: PatternSink + ?Sized> {
    db: &'run TransactionDb<T>,
    sink: &'run mut S,
    trace: Option<&'run dyn MineTraceSink>,
    config: MineConfig,
    occs: OccurrenceArena,
    oracle: GapOracle,
    weight_sums: Vec<f64>,
    stats: MineOutcome,
}

impl<'run, T: Token, S: PatternSink + ?Sized> Projector<'run, T, S> {
    pub(crate) fn new(
        db: &'run TransactionDb<T>,
        sink: &'run mut S,
        trace: Option<&'run dyn MineTraceSink>,
        config: MineConfig,
    ) -> Result<Self, InternalError> {
        let occs = OccurrenceArena::build(db)?;
        let oracle = GapOracle::new(db.item_count())?;
        let mut weight_sums = Vec::new();
        if T::WEIGHTED {
            weight_sums
                .try_reserve_exact(db.max_transaction_len())
                .map_err(|_| {
                    InternalError::out_of_memory(ErrorOrigin::Projection, "weight sums")
                })?;
            weight_sums.resize(db.max_transaction_len(), 0.0);
        }

        Ok(Self {
            db,
            sink,
            trace,
            config,
            occs,
            oracle,
            weight_sums,
            stats: MineOutcome::default(),
        })
    }

    pub(crate) fn into_stats(self) -> MineOutcome {
        self.stats
    }

    /// One recursion frame: grow the prefix from length `depth` to
    /// `depth + 1` with every sufficiently supported item, in ascending
    /// item order. Returns the maximum support observed among qualifying
    /// extensions so the caller can settle its own closedness.
    pub(crate) fn recurse(
        &mut self,
        exts: &ExtensionArena,
        z: usize,
        depth: usize,
    ) -> Result<Support, InternalError> {
        let n = depth + 1;
        self.stats.frames += 1;
        let mut cond = if n < self.config.max_len {
            Some(ExtensionArena::with_capacity(self.db.item_count(), z)?)
        } else {
            None
        };

        let mut max: Support = 0;
        for raw in 0..self.db.item_count() {
            let support = exts.support(raw);
            if support < self.config.min_support {
                continue;
            }
            self.stats.extensions_scanned += 1;
            if support > max {
                max = support;
            }
            let item = ItemId::new(raw as u32);

            // Commit: the item becomes position `depth` of every matched
            // occurrence. The oracle reads this slot, so the writes come
            // first; sibling items simply overwrite it.
            for x in exts.entries(raw) {
                self.occs.set_position(x.occ, depth, x.offset);
            }
            self.sink.add(item, support)?;

            if self.config.target == Target::Closed
                && self
                    .oracle
                    .gap_covered(self.db, &self.occs, exts.entries(raw), n)
            {
                // An insertable item rides along in every occurrence, so
                // nothing below this extension can be closed either.
                self.stats.gap_rejections += 1;
                trace::emit(self.trace, MineTraceEvent::GapPruned { item, len: n });
                self.sink.remove(1);
                continue;
            }

            let mut child_max: Support = 0;
            if let Some(cond) = cond.as_mut() {
                let tail_bound =
                    cond.refill_conditional(self.db, &self.occs, exts.entries(raw));
                if tail_bound > 0 {
                    child_max = self.recurse(cond, tail_bound, depth + 1)?;
                }
            }

            if self.config.target != Target::Closed || child_max < support {
                if T::WEIGHTED {
                    weight_sums_into(self.db, &self.occs, exts.entries(raw), n, &mut self.weight_sums);
                }
                let sums: Option<&[f64]> = T::WEIGHTED.then(|| &self.weight_sums[..n]);
                self.sink.report(support, sums)?;
                self.stats.reported += 1;
                trace::emit(self.trace, MineTraceEvent::Report { len: n, support });
            }
            self.sink.remove(1);
        }

        Ok(max)
    }
}

/// `out[k] = Σ tx_weight · item_weight(pos[k])` over the bucket's
/// occurrences; sinks divide by the support for the mean.
fn weight_sums_into<T: Token>(
    db: &TransactionDb<T>,
    occs: &OccurrenceArena,
    entries: &[OccExt],
    n: usize,
    out: &mut [f64],
) {
    for slot in &mut out[..n] {
        *slot = 0.0;
    }
    for x in entries {
        let weight = occs.weight(x.occ) as f64;
        let tokens = db.tokens(occs.tx(x.occ));
        for (k, slot) in out[..n].iter_mut().enumerate() {
            let offset = occs.position(x.occ, k) as usize;
            *slot += weight * tokens[offset].weight();
        }
    }
}
