//! Fixed-size worker pool.
//!
//! The producer pushes jobs onto a bounded dispatch queue; `workers` threads
//! each take one job at a time, run it to completion and push one [`Outcome`]
//! to the results channel. The caller's thread then drains exactly one outcome
//! per submitted job. Both channels are sized to the job count, so neither the
//! producer nor the workers ever wait on capacity.
//!
//! Concurrency is bounded by the number of workers alone. A failing job only
//! produces a failed outcome; its worker moves on to the next job.

mod aggregate;
mod outcome;
mod worker;

use anyhow::{Context, Result};
use std::any::Any;
use std::sync::mpsc;
use std::sync::Arc;

use crate::exec::Executor;
use crate::job::Job;

pub use outcome::{FailedJob, Outcome, RunSummary};

/// Default number of concurrent jobs.
pub const DEFAULT_WORKERS: usize = 6;

/// Runs every job from `jobs` on a pool of `workers` threads (at least one) and
/// returns the tally.
///
/// Jobs are pulled from the iterator and queued in iteration order on the
/// calling thread, so any state the iterator mutates (sequence labels) is never
/// shared with the workers. Completion order is unspecified.
pub fn run_pool<I>(
    jobs: I,
    workers: usize,
    executor: Arc<dyn Executor>,
    verbose: bool,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Job>,
    I::IntoIter: ExactSizeIterator,
{
    let jobs = jobs.into_iter();
    let total = jobs.len();
    if total == 0 {
        return Ok(RunSummary::new(0));
    }
    let num_workers = workers.max(1);

    let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(total);
    let (result_tx, result_rx) = mpsc::sync_channel::<Outcome>(total);

    let mut handles = Vec::with_capacity(num_workers);
    for id in 0..num_workers {
        let handle = worker::spawn_worker(
            id,
            job_rx.clone(),
            result_tx.clone(),
            Arc::clone(&executor),
            verbose,
        )
        .with_context(|| format!("spawn worker {}", id))?;
        handles.push(handle);
    }
    // Workers hold the only receivers and senders from here on, so the queue
    // disconnects when the producer is done and results disconnect when every
    // worker has exited.
    drop(job_rx);
    drop(result_tx);

    tracing::info!(jobs = total, workers = num_workers, "dispatching jobs");

    let mut submitted = 0usize;
    for job in jobs {
        if job_tx.send(job).is_err() {
            tracing::error!("all workers exited before the queue was filled");
            break;
        }
        submitted += 1;
    }
    drop(job_tx);

    let collected = aggregate::aggregate(&result_rx, submitted);

    let mut panicked: Option<String> = None;
    for handle in handles {
        if let Err(payload) = handle.join() {
            panicked.get_or_insert_with(|| panic_message(payload.as_ref()));
        }
    }
    if let Some(msg) = panicked {
        return Err(anyhow::anyhow!("worker panicked: {}", msg));
    }

    let summary = collected?;
    tracing::info!(
        succeeded = summary.succeeded,
        total = summary.total,
        "run finished"
    );
    Ok(summary)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
