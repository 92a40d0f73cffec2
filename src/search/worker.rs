//! Run a synthesis on a worker thread with a wall-clock deadline

use crate::error::SynthesisError;
use crate::graph::Graph;
use crate::schedule::Schedule;
use crate::search::{SynthesisConfig, SynthesisResult, synthesize};
use crossbeam_channel::{RecvTimeoutError, bounded};
use std::time::Duration;
use tracing::warn;

/// Synthesize on a background thread, giving up after `deadline`
///
/// The solver cannot be interrupted from outside, so a worker that misses
/// the deadline is detached and left to finish on its own; its result is
/// dropped. Use `solver_timeout` in the config to bound each solver call.
pub fn synthesize_with_deadline(
    graph: Graph,
    config: SynthesisConfig,
    deadline: Duration,
) -> Result<(Schedule, SynthesisResult), SynthesisError> {
    let (tx, rx) = bounded(1);

    std::thread::spawn(move || {
        let outcome = synthesize(&graph, &config);
        // The receiver is gone once the deadline has passed
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(deadline) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            warn!(?deadline, "synthesis deadline exceeded");
            Err(SynthesisError::DeadlineExceeded(deadline))
        }
        Err(RecvTimeoutError::Disconnected) => Err(SynthesisError::WorkerDisconnected),
    }
}
