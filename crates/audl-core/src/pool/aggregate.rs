//! Fan-in: collect exactly one outcome per submitted job.

use anyhow::Result;
use std::sync::mpsc::Receiver;

use super::outcome::{Outcome, RunSummary};

/// Blocks until `total` outcomes have arrived, in any order.
///
/// Returns an error instead of hanging if every worker has gone away before
/// all outcomes were delivered (a worker panicked mid-job).
pub(super) fn aggregate(results: &Receiver<Outcome>, total: usize) -> Result<RunSummary> {
    let mut summary = RunSummary::new(total);
    for received in 0..total {
        let outcome = results.recv().map_err(|_| {
            anyhow::anyhow!(
                "worker result channel closed after {} of {} outcomes (worker may have panicked)",
                received,
                total
            )
        })?;
        if outcome.is_success() {
            tracing::debug!(url = %outcome.url, "job succeeded");
        } else {
            tracing::debug!(url = %outcome.url, "job failed");
        }
        summary.record(outcome);
    }
    Ok(summary)
}
