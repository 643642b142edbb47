//! A single pool worker: drain the dispatch queue one job at a time.

use crossbeam_channel::Receiver;
use std::io;
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::exec::Executor;
use crate::job::Job;

use super::outcome::Outcome;

/// Spawn worker `id`. It exits when the queue is closed and empty, and returns
/// the number of jobs it ran.
pub(super) fn spawn_worker(
    id: usize,
    jobs: Receiver<Job>,
    results: SyncSender<Outcome>,
    executor: Arc<dyn Executor>,
    verbose: bool,
) -> io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name(format!("audl-worker-{id}"))
        .spawn(move || {
            let mut ran = 0usize;
            for job in jobs.iter() {
                ran += 1;
                if verbose {
                    println!("{}", job);
                }
                tracing::debug!(worker = id, job = %job.display_name(), "starting job");

                let result = executor.execute(&job);
                match &result {
                    Ok(()) => {
                        if verbose {
                            println!("{} downloaded successfully", job.output_path.display());
                        }
                        tracing::info!(worker = id, url = %job.url, "job finished");
                    }
                    Err(e) => {
                        if verbose {
                            println!("{}", e.detail());
                        }
                        tracing::warn!(worker = id, url = %job.url, error = %e, "job failed");
                    }
                }

                // Only fails if the aggregator is gone; nothing left to report to.
                if results.send(Outcome::new(job, result)).is_err() {
                    break;
                }
            }
            tracing::debug!(worker = id, ran, "worker exiting");
            ran
        })
}
