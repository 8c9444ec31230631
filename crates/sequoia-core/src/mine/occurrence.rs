//! Module: mine::occurrence
//! Responsibility: the occurrence arena — one record per transaction plus
//! one shared flat buffer of cursor positions carved per occurrence.
//! Does not own: extension partitioning or recursion control flow.
//! Boundary: the slot at depth `d` is written only while the engine runs
//! its depth-`d` item loop; frames above never read it.

use crate::{
    db::{Support, Token, TransactionDb},
    error::{ErrorOrigin, InternalError},
};

///
/// Occurrence
///
/// One way the current prefix matches one transaction. The record is
/// created once for the empty prefix and reused at every depth: the
/// engine appends one cursor position per descent and abandons it on
/// return. Cursor positions are offsets into the transaction's token
/// slice, strictly increasing along the prefix.
///

#[derive(Clone, Copy, Debug)]
struct Occurrence {
    tx: u32,
    weight: Support,
    pos_start: u32,
}

///
/// OccurrenceArena
///
/// `occs[j]` owns the `positions` run `[pos_start, pos_start + len(j))`,
/// so the whole cursor state of the recursion lives in two flat buffers
/// sized from one pre-scan (`N` records, `extent` position slots).
///

#[derive(Debug)]
pub(crate) struct OccurrenceArena {
    occs: Vec<Occurrence>,
    positions: Vec<u32>,
}

impl OccurrenceArena {
    pub(crate) fn build<T: Token>(db: &TransactionDb<T>) -> Result<Self, InternalError> {
        let mut occs = Vec::new();
        occs.try_reserve_exact(db.transaction_count())
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Arena, "occurrence records"))?;
        let mut positions = Vec::new();
        positions
            .try_reserve_exact(db.extent())
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Arena, "cursor positions"))?;
        positions.resize(db.extent(), 0);

        let mut pos_start = 0u32;
        for tx in 0..db.transaction_count() {
            occs.push(Occurrence {
                tx: tx as u32,
                weight: db.weight(tx),
                pos_start,
            });
            pos_start += db.len(tx) as u32;
        }

        Ok(Self { occs, positions })
    }

    #[must_use]
    pub(crate) fn tx(&self, occ: u32) -> usize {
        self.occs[occ as usize].tx as usize
    }

    #[must_use]
    pub(crate) fn weight(&self, occ: u32) -> Support {
        self.occs[occ as usize].weight
    }

    #[must_use]
    pub(crate) fn position(&self, occ: u32, depth: usize) -> u32 {
        self.positions[self.occs[occ as usize].pos_start as usize + depth]
    }

    pub(crate) fn set_position(&mut self, occ: u32, depth: usize, offset: u32) {
        self.positions[self.occs[occ as usize].pos_start as usize + depth] = offset;
    }
}

///
/// TESTS
///
