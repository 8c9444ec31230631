//! Module: mine::extension
//! Responsibility: the extension arena — per-item buckets partitioning a
//! flat run of occurrence extensions, rebuilt by three-pass layout.
//! Does not own: cursor state (occurrence arena) or the recursion.
//! Boundary: counts from the first pass are provisional upper bounds;
//! slices are carved from them and filled to their true, deduplicated
//! lengths.

use crate::{
    db::{Support, Token, TransactionDb},
    error::{ErrorOrigin, InternalError},
    mine::occurrence::OccurrenceArena,
};

///
/// OccExt
///
/// Candidate one-step extension of occurrence `occ` by the token at
/// `offset` inside that occurrence's transaction. The offset is always
/// strictly right of the occurrence's current cursor.
///

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OccExt {
    pub(crate) occ: u32,
    pub(crate) offset: u32,
}

///
/// Bucket
///
/// Per-item grouping of extensions: support, entry count, and the start
/// of the bucket's carved run inside the arena's flat entry buffer.
///

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Bucket {
    support: Support,
    len: u32,
    start: u32,
}

///
/// ExtensionArena
///
/// `M` buckets over one flat `entries` buffer of capacity `z`, sized by
/// the caller's pre-scan. A conditional frame reuses one arena across
/// its whole item loop: every refill resets the buckets and re-carves.
///
/// Within one cursor state each distinct item takes only its first
/// position after the cursor per occurrence; the fill passes skip a tail
/// position whose bucket already ends with the same occurrence (entries
/// of one occurrence are appended contiguously, so the check is O(1)).
/// This is what makes bucket support a sum over distinct transactions.
///

#[derive(Debug)]
pub(crate) struct ExtensionArena {
    buckets: Vec<Bucket>,
    entries: Vec<OccExt>,
}

impl ExtensionArena {
    pub(crate) fn with_capacity(item_count: usize, z: usize) -> Result<Self, InternalError> {
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(item_count)
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Arena, "extension buckets"))?;
        buckets.resize(item_count, Bucket::default());
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(z)
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Arena, "extension entries"))?;
        entries.resize(z, OccExt::default());

        Ok(Self { buckets, entries })
    }

    #[must_use]
    pub(crate) fn support(&self, item: usize) -> Support {
        self.buckets[item].support
    }

    #[must_use]
    pub(crate) fn entries(&self, item: usize) -> &[OccExt] {
        let Bucket { len, start, .. } = self.buckets[item];
        &self.entries[start as usize..(start + len) as usize]
    }

    /// Partition every transaction position for the empty prefix. The
    /// occurrence index equals the transaction index at depth zero.
    pub(crate) fn fill_initial<T: Token>(&mut self, db: &TransactionDb<T>) {
        self.reset();
        for tx in 0..db.transaction_count() {
            for token in db.tokens(tx) {
                self.buckets[token.item().index()].len += 1;
            }
        }
        self.carve();
        for tx in 0..db.transaction_count() {
            let weight = db.weight(tx);
            for (offset, token) in db.tokens(tx).iter().enumerate() {
                self.append(token.item().index(), tx as u32, offset as u32, weight);
            }
        }
    }

    /// Partition the tails of `parent`'s extensions: every position
    /// strictly right of each entry's offset. Returns the total number
    /// of tail positions visited (pre-dedup) — the entry-buffer bound
    /// for the child frame.
    pub(crate) fn refill_conditional<T: Token>(
        &mut self,
        db: &TransactionDb<T>,
        occs: &OccurrenceArena,
        parent: &[OccExt],
    ) -> usize {
        self.reset();
        let mut visited = 0usize;
        for x in parent {
            let tokens = db.tokens(occs.tx(x.occ));
            for token in &tokens[x.offset as usize + 1..] {
                self.buckets[token.item().index()].len += 1;
                visited += 1;
            }
        }
        self.carve();
        for x in parent {
            let weight = occs.weight(x.occ);
            let tokens = db.tokens(occs.tx(x.occ));
            for (tail, token) in tokens[x.offset as usize + 1..].iter().enumerate() {
                let offset = x.offset + 1 + tail as u32;
                self.append(token.item().index(), x.occ, offset, weight);
            }
        }

        visited
    }

    fn reset(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Bucket::default();
        }
    }

    /// Turn provisional counts into carved runs and rewind the counts so
    /// the fill pass can append.
    fn carve(&mut self) {
        let mut start = 0u32;
        for bucket in &mut self.buckets {
            bucket.start = start;
            start += bucket.len;
            bucket.len = 0;
        }
    }

    fn append(&mut self, item: usize, occ: u32, offset: u32, weight: Support) {
        let bucket = &mut self.buckets[item];
        let at = (bucket.start + bucket.len) as usize;
        if bucket.len > 0 && self.entries[at - 1].occ == occ {
            // Unique item occurrence: this occurrence already contributed
            // its first position of the item after the cursor.
            return;
        }
        self.entries[at] = OccExt { occ, offset };
        bucket.len += 1;
        bucket.support = bucket.support.saturating_add(weight);
    }
}

///
/// TESTS
///
