//! Core runtime for Sequoia: the prepared transaction database, the
//! projection-based mining engine, and the reporting boundary, with the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod mine;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, arenas, or engine internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{ItemId, Support, Token, TransactionDb, WeightedItem},
        mine::{MemorySink, MineConfig, MineOutcome, Pattern, PatternSink, Target, mine},
    };
}
