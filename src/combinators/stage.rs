use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, warn};

use crate::conduit::FaultSlot;
use crate::error::PatternError;

/// The kind of worker task a combinator spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Feeds an iterator into a fresh outlet
    Source,
    /// Fan-in, one worker per input stream
    Merge,
    /// Sequential chain of input streams
    Concat,
    /// Round-robin fan-out
    Split,
    /// Broadcast fan-out
    Tee,
    /// Element-wise mapping
    Transform,
    /// Predicate selection
    Filter,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Source => "source",
            Stage::Merge => "merge",
            Stage::Concat => "concat",
            Stage::Split => "split",
            Stage::Tee => "tee",
            Stage::Transform => "transform",
            Stage::Filter => "filter",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run a worker body, recording a panic as a fault instead of unwinding
///
/// The body must only borrow the worker's senders. The caller drops them after
/// this returns, which guarantees the fault is visible before any output
/// reports end-of-stream.
pub(crate) async fn guarded<F>(stage: Stage, slot: &FaultSlot, work: F)
where
    F: Future<Output = ()>,
{
    if let Err(payload) = AssertUnwindSafe(work).catch_unwind().await {
        let fault = PatternError::from_panic(stage, payload);
        error!(%stage, error = %fault, "Worker faulted, closing outputs");
        slot.record(fault);
    }
}

/// Copy a fault recorded upstream of a worker's input into its own slot
///
/// Called once the input has ended and before the worker drops its senders,
/// so a fault anywhere earlier in a chain reaches the final outlet.
pub(crate) fn carry_forward(stage: Stage, upstream: Option<&FaultSlot>, slot: &FaultSlot) {
    if let Some(fault) = upstream.and_then(FaultSlot::get) {
        warn!(%stage, error = %fault, "Input faulted upstream, carrying fault forward");
        slot.record(fault.clone());
    }
}
