//! Prepared transaction database: token vocabulary and the read-only
//! flat-buffer store the mining engine projects over.

pub(crate) mod token;
pub(crate) mod transactions;

// re-exports
pub use token::{ItemId, Support, Token, WeightedItem};
pub use transactions::{TransactionDb, TransactionDbBuilder};
