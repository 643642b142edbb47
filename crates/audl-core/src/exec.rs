//! Running a job to completion.
//!
//! Workers only see the [`Executor`] trait; [`ProcessExecutor`] is the real
//! child-process implementation.

use std::io;
use std::process::{Command, Stdio};

use crate::job::Job;

/// Why a single job failed. Never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The child could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The child ran and exited unsuccessfully.
    #[error("{program} {}", describe_exit(.code))]
    Exit {
        program: String,
        /// `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured stdout followed by stderr.
        output: String,
    },
}

impl JobError {
    /// Captured child output, if the child got far enough to produce any.
    pub fn output(&self) -> Option<&str> {
        match self {
            JobError::Exit { output, .. } if !output.trim().is_empty() => Some(output),
            _ => None,
        }
    }

    /// What to show an operator for this failure: the child's output when
    /// there is any, otherwise the error itself.
    pub fn detail(&self) -> String {
        match self.output() {
            Some(output) => output.trim_end().to_string(),
            None => self.to_string(),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with status {}", c),
        None => "was terminated by a signal".to_string(),
    }
}

/// Runs one job to completion, blocking the calling thread.
pub trait Executor: Send + Sync {
    fn execute(&self, job: &Job) -> Result<(), JobError>;
}

impl<F> Executor for F
where
    F: Fn(&Job) -> Result<(), JobError> + Send + Sync,
{
    fn execute(&self, job: &Job) -> Result<(), JobError> {
        self(job)
    }
}

/// Spawns `job.program` with `job.args` and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, job: &Job) -> Result<(), JobError> {
        let output = Command::new(&job.program)
            .args(&job.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| JobError::Spawn {
                program: job.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(JobError::Exit {
            program: job.program.clone(),
            code: output.status.code(),
            output: combined,
        })
    }
}
