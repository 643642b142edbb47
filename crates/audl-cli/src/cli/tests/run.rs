//! Tests for the download run: preflight, empty input, summary output.

use super::parse;
use crate::cli::download::{failure_lines, run_download, RunStatus};
use audl_core::config::AudlConfig;
use audl_core::pool::{FailedJob, RunSummary};
use audl_core::preflight::PreflightError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Config whose required tools are both `sh`, which every Unix host has.
fn sh_config() -> AudlConfig {
    AudlConfig {
        downloader: "sh".to_string(),
        media_toolkit: "sh".to_string(),
        ..AudlConfig::default()
    }
}

fn run_with_file(dir: &Path, contents: &str, cfg: &AudlConfig) -> anyhow::Result<RunStatus> {
    let file = dir.join("links");
    fs::write(&file, contents).unwrap();
    let out = dir.join("out");
    let cli = parse(&[
        "audl",
        "--file",
        file.to_str().unwrap(),
        "--dir",
        out.to_str().unwrap(),
        "--batch",
        "2",
    ]);
    run_download(&cli, cfg)
}

#[cfg(unix)]
#[test]
fn blank_and_option_only_file_is_no_songs() {
    let dir = tempdir().unwrap();
    let status = run_with_file(dir.path(), "\n   \n--quiet\n--no-playlist\n", &sh_config()).unwrap();
    assert!(matches!(status, RunStatus::NoSongs));
    assert_eq!(
        format!("{:?}", status.exit_code()),
        format!("{:?}", std::process::ExitCode::FAILURE)
    );
}

#[cfg(unix)]
#[test]
fn all_rejected_lines_is_no_songs() {
    let dir = tempdir().unwrap();
    let text = "just a title\nhttp://example.com/plain\nTitle https:// example.com\n";
    let status = run_with_file(dir.path(), text, &sh_config()).unwrap();
    assert!(matches!(status, RunStatus::NoSongs));
}

#[cfg(unix)]
#[test]
fn failing_downloader_still_finishes_run() {
    let dir = tempdir().unwrap();
    // `sh` rejects the downloader flags, so the single job fails.
    let status = run_with_file(dir.path(), "Song https://x.org/1\n", &sh_config()).unwrap();
    let RunStatus::Finished(summary) = &status else {
        panic!("expected Finished, got {:?}", status);
    };
    assert_eq!(summary.to_string(), "Done. Downloaded 0/1.");
    assert_eq!(
        format!("{:?}", status.exit_code()),
        format!("{:?}", std::process::ExitCode::SUCCESS)
    );
    let lines = failure_lines(summary);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("failed: Song: sh exited with status"), "{}", lines[0]);
}

#[test]
fn missing_tool_is_fatal_before_reading_links() {
    let dir = tempdir().unwrap();
    let cfg = AudlConfig {
        downloader: "audl-test-missing-downloader".to_string(),
        ..sh_config()
    };
    // The link file is never created; preflight must fail first.
    let cli = parse(&["audl", "--file", dir.path().join("absent").to_str().unwrap()]);
    let err = run_download(&cli, &cfg).unwrap_err();
    match err.downcast_ref::<PreflightError>() {
        Some(PreflightError::NotFound { tool }) => assert_eq!(tool, "audl-test-missing-downloader"),
        None => panic!("expected PreflightError, got {:#}", err),
    }
}

#[test]
fn failure_lines_name_jobs_by_title_or_url() {
    let summary = RunSummary {
        succeeded: 1,
        total: 3,
        failures: vec![
            FailedJob {
                title: "Song A".to_string(),
                url: "https://x.org/1".to_string(),
                reason: "yt-dlp exited with status 1".to_string(),
            },
            FailedJob {
                title: String::new(),
                url: "https://x.org/2".to_string(),
                reason: "failed to start yt-dlp: not found".to_string(),
            },
        ],
    };
    assert_eq!(
        failure_lines(&summary),
        vec![
            "failed: Song A: yt-dlp exited with status 1",
            "failed: https://x.org/2: failed to start yt-dlp: not found",
        ]
    );
}
