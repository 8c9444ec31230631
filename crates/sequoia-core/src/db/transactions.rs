//! Module: db::transactions
//! Responsibility: the prepared, read-only transaction database.
//! Does not own: file parsing, item recoding, or any mining state.
//! Boundary: the builder validates, sorts, and reduces; the database is
//! immutable afterwards and only ever borrowed by the engine.

use crate::{
    db::token::{Support, Token},
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use std::cmp::Ordering;

///
/// TxBounds
/// `(start, len)` descriptor of one transaction's run inside the flat
/// token buffer.
///

#[derive(Clone, Copy, Debug)]
struct TxBounds {
    start: u32,
    len: u32,
}

///
/// TransactionDb
///
/// Prepared database of weighted transactions over a dense item alphabet
/// `[0, M)`. Transactions live back to back in one flat token buffer;
/// per-transaction bounds and weights are parallel arrays. The store is
/// read-only: the engine borrows token slices and never mutates them.
///

#[derive(Clone, Debug)]
pub struct TransactionDb<T> {
    tokens: Vec<T>,
    bounds: Vec<TxBounds>,
    weights: Vec<Support>,
    item_count: usize,
    total_weight: Support,
    max_transaction_len: usize,
}

impl<T: Token> TransactionDb<T> {
    #[must_use]
    pub const fn builder(item_count: usize) -> TransactionDbBuilder<T> {
        TransactionDbBuilder {
            item_count,
            rows: Vec::new(),
        }
    }

    /// Number of distinct items `M`; item ids are dense in `[0, M)`.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of transactions `N` (after duplicate reduction).
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.bounds.len()
    }

    /// Total database weight `W = Σ weight(j)`.
    #[must_use]
    pub const fn total_weight(&self) -> Support {
        self.total_weight
    }

    /// Total number of token positions `Σ len(j)`.
    #[must_use]
    pub const fn extent(&self) -> usize {
        self.tokens.len()
    }

    /// Length of the longest transaction; bounds the mining depth.
    #[must_use]
    pub const fn max_transaction_len(&self) -> usize {
        self.max_transaction_len
    }

    #[must_use]
    pub fn weight(&self, tx: usize) -> Support {
        self.weights[tx]
    }

    #[must_use]
    pub fn len(&self, tx: usize) -> usize {
        self.bounds[tx].len as usize
    }

    #[must_use]
    pub fn tokens(&self, tx: usize) -> &[T] {
        let TxBounds { start, len } = self.bounds[tx];
        &self.tokens[start as usize..(start + len) as usize]
    }
}

///
/// TransactionDbBuilder
///
/// Validating builder. `push` rejects out-of-alphabet items and zero
/// weights; `build` sorts transactions lexicographically, merges exact
/// duplicates by summing their weights, and lays the survivors out in
/// the flat buffer.
///

#[derive(Debug)]
pub struct TransactionDbBuilder<T> {
    item_count: usize,
    rows: Vec<(Vec<T>, Support)>,
}

impl<T: Token> TransactionDbBuilder<T> {
    pub fn push(&mut self, tokens: Vec<T>, weight: Support) -> Result<(), InternalError> {
        if weight == 0 {
            return Err(InternalError::new(
                ErrorClass::Config,
                ErrorOrigin::Database,
                "transaction weight must be at least 1",
            ));
        }
        for token in &tokens {
            if token.item().index() >= self.item_count {
                return Err(InternalError::new(
                    ErrorClass::Config,
                    ErrorOrigin::Database,
                    format!(
                        "item {} outside the alphabet [0, {})",
                        token.item(),
                        self.item_count
                    ),
                ));
            }
        }
        self.rows.push((tokens, weight));

        Ok(())
    }

    pub fn build(mut self) -> Result<TransactionDb<T>, InternalError> {
        self.rows
            .sort_by(|(a, _), (b, _)| cmp_token_rows::<T>(a, b));

        // Duplicate reduction: identical token rows collapse into one
        // transaction whose weight is the sum of the merged weights.
        let mut reduced: Vec<(Vec<T>, Support)> = Vec::new();
        for (tokens, weight) in self.rows {
            match reduced.last_mut() {
                Some((last, last_weight))
                    if cmp_token_rows::<T>(last, &tokens) == Ordering::Equal =>
                {
                    *last_weight = last_weight.saturating_add(weight);
                }
                _ => reduced.push((tokens, weight)),
            }
        }

        let extent: usize = reduced.iter().map(|(tokens, _)| tokens.len()).sum();
        if reduced.len() > u32::MAX as usize || extent > u32::MAX as usize {
            return Err(InternalError::invariant(
                ErrorOrigin::Database,
                "transaction count and extent must fit dense u32 indices",
            ));
        }

        let mut tokens = Vec::new();
        tokens
            .try_reserve_exact(extent)
            .map_err(|_| InternalError::out_of_memory(ErrorOrigin::Database, "token buffer"))?;
        let mut bounds = Vec::with_capacity(reduced.len());
        let mut weights = Vec::with_capacity(reduced.len());
        let mut total_weight: Support = 0;
        let mut max_transaction_len = 0;

        for (row, weight) in reduced {
            bounds.push(TxBounds {
                start: tokens.len() as u32,
                len: row.len() as u32,
            });
            max_transaction_len = max_transaction_len.max(row.len());
            total_weight = total_weight.saturating_add(weight);
            weights.push(weight);
            tokens.extend(row);
        }

        Ok(TransactionDb {
            tokens,
            bounds,
            weights,
            item_count: self.item_count,
            total_weight,
            max_transaction_len,
        })
    }
}

fn cmp_token_rows<T: Token>(a: &[T], b: &[T]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.order(*y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.len().cmp(&b.len())
}

///
/// TESTS
///
