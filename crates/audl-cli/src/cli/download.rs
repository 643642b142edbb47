//! The download run: preflight, load links, run the pool, report.

use anyhow::Result;
use audl_core::batch::{self, BatchOptions};
use audl_core::config::AudlConfig;
use audl_core::exec::ProcessExecutor;
use audl_core::job::JobOptions;
use audl_core::links;
use audl_core::pool::RunSummary;
use audl_core::preflight;
use std::process::ExitCode;
use std::sync::Arc;

use super::Cli;

/// Resolve CLI flags over config into the options for one batch.
pub(super) fn batch_options(cli: &Cli, cfg: &AudlConfig) -> BatchOptions {
    let mut job = JobOptions::from_config(cfg, &cli.dir).with_extra_command(&cli.command);
    if let Some(format) = cli.audio_format {
        job.audio_format = format;
    }
    BatchOptions {
        start_index: cli.index,
        workers: cli.batch.unwrap_or(cfg.batch).max(1),
        verbose: cli.verbose,
        job,
    }
}

/// How a download run ended, short of a fatal error.
#[derive(Debug)]
pub(super) enum RunStatus {
    /// The link file had nothing usable; no downloads were attempted.
    NoSongs,
    /// Every usable link was attempted.
    Finished(RunSummary),
}

impl RunStatus {
    /// Job failures still exit successfully; only an empty link list fails.
    pub(super) fn exit_code(&self) -> ExitCode {
        match self {
            RunStatus::NoSongs => ExitCode::FAILURE,
            RunStatus::Finished(_) => ExitCode::SUCCESS,
        }
    }
}

pub(super) fn run_download(cli: &Cli, cfg: &AudlConfig) -> Result<RunStatus> {
    preflight::require_tools(&[cfg.downloader.as_str(), cfg.media_toolkit.as_str()])?;

    let list = links::load_links(&cli.file)?;
    for rejected in &list.rejected {
        eprintln!("{}", rejected);
        tracing::warn!("skipped line: {}", rejected);
    }
    if list.is_empty() {
        eprintln!("There are no songs to download :(");
        return Ok(RunStatus::NoSongs);
    }

    let opts = batch_options(cli, cfg);
    tracing::info!(
        file = %cli.file.display(),
        dir = %cli.dir.display(),
        links = list.links.len(),
        workers = opts.workers,
        format = %opts.job.audio_format,
        "starting downloads"
    );
    let summary = batch::run_batch(&list.links, &opts, Arc::new(ProcessExecutor))?;
    println!("{}", summary);
    for line in failure_lines(&summary) {
        eprintln!("{}", line);
    }
    Ok(RunStatus::Finished(summary))
}

/// One `failed: <name>: <reason>` line per failed job.
pub(super) fn failure_lines(summary: &RunSummary) -> Vec<String> {
    summary
        .failures
        .iter()
        .map(|failed| format!("failed: {}: {}", failed.display_name(), failed.reason))
        .collect()
}
