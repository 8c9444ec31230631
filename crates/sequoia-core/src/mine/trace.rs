//! Mining trace boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! mining semantics.

use crate::db::{ItemId, Support};

///
/// MineTraceSink
///

pub trait MineTraceSink {
    fn on_event(&self, event: MineTraceEvent);
}

///
/// MineTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MineTraceEvent {
    Start {
        transactions: usize,
        items: usize,
        total_weight: Support,
    },
    Report {
        len: usize,
        support: Support,
    },
    GapPruned {
        item: ItemId,
        len: usize,
    },
    Finish {
        reported: u64,
        max_unit_support: Support,
    },
}

pub(crate) fn emit(sink: Option<&dyn MineTraceSink>, event: MineTraceEvent) {
    if let Some(sink) = sink {
        sink.on_event(event);
    }
}

///
/// TESTS
///
