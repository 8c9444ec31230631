//! # sequoia
//!
//! `sequoia` is the **public facade crate** for the Sequoia mining
//! engine. It is the recommended dependency for downstream projects.
//!
//! This crate exposes:
//! - the prepared transaction database and its builder (`db`),
//! - the mining driver, configuration, and reporting boundary (`mine`),
//! - the shared error types (`error`).
//!
//! Low-level engine internals (arenas, the projection recursion, the
//! closedness oracle) live in `sequoia-core` and are not part of the
//! supported surface.
//!
//! ## Prelude
//!
//! `prelude` carries the domain vocabulary and is intended to be
//! glob-imported where mining runs are wired up.

pub use sequoia_core::{db, error, mine};

pub mod prelude {
    pub use sequoia_core::prelude::*;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn facade_surface_supports_a_whole_run() {
        let mut builder = TransactionDb::<ItemId>::builder(2);
        builder
            .push(vec![ItemId::new(0), ItemId::new(1)], 2)
            .expect("valid row");
        let db = builder.build().expect("build should succeed");

        let config = MineConfig::all(1);
        let mut sink = MemorySink::for_config(&config);
        let outcome = mine(&db, &config, &mut sink).expect("mining should succeed");

        assert_eq!(
            outcome.reported, 4,
            "two items, their sequence, and the empty sequence"
        );
        assert_eq!(outcome.max_unit_support, 2);
        assert_eq!(
            sink.patterns().len(),
            3,
            "the sink's min_len gate drops the empty sequence"
        );
    }
}
