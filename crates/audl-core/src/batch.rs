//! One batch run: label links in input order, build jobs, run them on the pool.

use anyhow::Result;
use std::sync::Arc;

use crate::exec::Executor;
use crate::job::{build_job, Job, JobOptions};
use crate::links::ParsedLink;
use crate::pool::{self, RunSummary};
use crate::sequencer::Sequencer;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// First sequence number; `<= 0` disables labels.
    pub start_index: i64,
    pub workers: usize,
    pub verbose: bool,
    pub job: JobOptions,
}

/// Lazily builds one job per link, consuming one label per job in link order.
pub fn job_stream<'a>(
    links: &'a [ParsedLink],
    sequencer: &'a mut Sequencer,
    opts: &'a JobOptions,
) -> impl ExactSizeIterator<Item = Job> + 'a {
    links.iter().map(move |link| {
        let label = sequencer.next_label();
        build_job(opts, link, &label)
    })
}

/// Run every link through the downloader. Padding width follows `links.len()`.
pub fn run_batch(
    links: &[ParsedLink],
    opts: &BatchOptions,
    executor: Arc<dyn Executor>,
) -> Result<RunSummary> {
    let mut sequencer = Sequencer::new(opts.start_index, links.len());
    if !sequencer.is_enabled() {
        tracing::debug!("sequence labels disabled");
    }
    let jobs = job_stream(links, &mut sequencer, &opts.job);
    pool::run_pool(jobs, opts.workers, executor, opts.verbose)
}
