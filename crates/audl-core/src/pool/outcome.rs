//! Per-job outcomes and the end-of-run summary.

use std::fmt;
use std::path::PathBuf;

use crate::exec::JobError;
use crate::job::Job;

/// Result of running one job. Carries the link it came from so failures can
/// be reported by name even though outcomes arrive in completion order.
#[derive(Debug)]
pub struct Outcome {
    pub title: String,
    pub url: String,
    pub output_path: PathBuf,
    pub result: Result<(), JobError>,
}

impl Outcome {
    pub fn new(job: Job, result: Result<(), JobError>) -> Self {
        Self {
            title: job.title,
            url: job.url,
            output_path: job.output_path,
            result,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A job that did not succeed, as reported after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedJob {
    pub title: String,
    pub url: String,
    pub reason: String,
}

impl FailedJob {
    /// Title if the line had one, else the URL.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// Aggregate result of a run. `succeeded + failures.len() == total` once every
/// outcome has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub total: usize,
    pub failures: Vec<FailedJob>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            succeeded: 0,
            total,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome.result {
            Ok(()) => self.succeeded += 1,
            Err(e) => self.failures.push(FailedJob {
                title: outcome.title,
                url: outcome.url,
                reason: e.to_string(),
            }),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Done. Downloaded {}/{}.", self.succeeded, self.total)
    }
}
