//! CLI for audl.

mod download;

use anyhow::Result;
use audl_core::config::{self, AudioFormat};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use download::run_download;

/// Download every link in a file as audio, several at a time.
#[derive(Debug, Parser)]
#[command(name = "audl")]
#[command(about = "audl: batch audio downloader", long_about = None)]
pub struct Cli {
    /// Starting sequence number for file names; 0 or negative disables numbering.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub index: i64,

    /// File with links, one per line, optionally prefixed by a title.
    #[arg(long, default_value = "links", value_name = "PATH")]
    pub file: PathBuf,

    /// Directory to store downloaded files in.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of parallel downloads (default from config, 6 if unset).
    #[arg(long, value_name = "N")]
    pub batch: Option<usize>,

    /// Print each downloader invocation and its outcome.
    #[arg(long)]
    pub verbose: bool,

    /// Extra arguments passed to every downloader invocation, space separated.
    #[arg(long, default_value = "", allow_hyphen_values = true, value_name = "ARGS")]
    pub command: String,

    /// Audio format to extract: opus or mp3 (default from config).
    #[arg(long, value_name = "FORMAT")]
    pub audio_format: Option<AudioFormat>,
}

pub fn run_from_args() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let status = run_download(&cli, &cfg)?;
    Ok(status.exit_code())
}

#[cfg(test)]
mod tests;
