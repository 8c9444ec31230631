//! Module: mine::closed
//! Responsibility: the closedness oracle — gap coverage over the
//! occurrences of a just-extended prefix.
//! Does not own: suffix closedness (the recursion's child-maximum check
//! covers extensions past the last matched position).
//! Boundary: scratch is restored to all-zero after every gap, in
//! O(items touched) via the touch stack.

use crate::{
    db::{Token, TransactionDb},
    error::{ErrorOrigin, InternalError},
    mine::{extension::OccExt, occurrence::OccurrenceArena},
};

///
/// GapOracle
///
/// Decides whether some item occurs strictly inside the same gap of
/// every occurrence of the current prefix — in which case that item
/// could be inserted without losing a single occurrence, so neither the
/// prefix nor anything below it can be closed.
///
/// `freq[v]` counts, while gap `k` is scanned, the occurrences whose gap
/// `k` contains item `v`; an item reaches count `i + 1` during occurrence
/// `i`'s walk only if it appeared in every occurrence processed so far.
/// `touched` remembers which counters to zero afterwards.
///

#[derive(Debug)]
pub(crate) struct GapOracle {
    freq: Vec<u32>,
    touched: Vec<u32>,
}

impl GapOracle {
    pub(crate) fn new(item_count: usize) -> Result<Self, InternalError> {
        let mut freq = Vec::new();
        freq.try_reserve_exact(item_count)
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Oracle, "frequency scratch"))?;
        freq.resize(item_count, 0);
        let mut touched = Vec::new();
        touched
            .try_reserve_exact(item_count)
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Oracle, "touch stack"))?;

        Ok(Self { freq, touched })
    }

    /// True when some item covers one gap across all of `entries`'
    /// occurrences, for a prefix of length `n` whose positions are
    /// committed in `occs`. Gaps are scanned from the newest backwards;
    /// an occurrence that leaves no surviving candidate aborts the gap.
    pub(crate) fn gap_covered<T: Token>(
        &mut self,
        db: &TransactionDb<T>,
        occs: &OccurrenceArena,
        entries: &[OccExt],
        n: usize,
    ) -> bool {
        for k in (0..n).rev() {
            let mut full = false;
            for (i, x) in entries.iter().enumerate() {
                let tokens = db.tokens(occs.tx(x.occ));
                let gap_start = if k == 0 {
                    0
                } else {
                    occs.position(x.occ, k - 1) as usize + 1
                };
                let gap_end = occs.position(x.occ, k) as usize;

                let mut reached = 0usize;
                for token in &tokens[gap_start..gap_end] {
                    let v = token.item().index();
                    // Only items seen in every occurrence so far are still
                    // candidates; anything else (including a repeat inside
                    // this gap) is skipped.
                    if self.freq[v] as usize != i {
                        continue;
                    }
                    self.freq[v] += 1;
                    if self.freq[v] == 1 {
                        self.touched.push(v as u32);
                    }
                    reached += 1;
                }

                if reached == 0 {
                    full = false;
                    break;
                }
                full = true;
            }

            while let Some(v) = self.touched.pop() {
                self.freq[v as usize] = 0;
            }
            if full {
                return true;
            }
        }

        false
    }

    #[cfg(test)]
    fn scratch_is_clean(&self) -> bool {
        self.touched.is_empty() && self.freq.iter().all(|&count| count == 0)
    }
}

///
/// TESTS
///
