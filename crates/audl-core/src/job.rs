//! Downloader invocations.
//!
//! A [`Job`] is a fully formed command line for one link. Building one is pure;
//! nothing here touches the filesystem or spawns a process.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{AudioFormat, AudlConfig};
use crate::links::ParsedLink;

/// Separator between the sequence label and the title in output filenames.
const LABEL_SEPARATOR: &str = " - ";

/// Downloader output template for the remote title, used when the line had none.
const REMOTE_TITLE_TEMPLATE: &str = "%(title)s";

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Settings shared by every job in a run.
#[derive(Debug, Clone)]
pub struct JobOptions {
    pub program: String,
    pub output_dir: PathBuf,
    pub audio_format: AudioFormat,
    pub format_selector: String,
    pub audio_quality: String,
    /// Appended verbatim after the fixed flags.
    pub extra_args: Vec<String>,
}

impl JobOptions {
    pub fn from_config(cfg: &AudlConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: cfg.downloader.clone(),
            output_dir: output_dir.into(),
            audio_format: cfg.audio_format,
            format_selector: cfg.format_selector.clone(),
            audio_quality: cfg.audio_quality.clone(),
            extra_args: Vec::new(),
        }
    }

    /// Split a single `--command` style string on whitespace into extra args.
    /// No quoting rules; the downloader rejects anything malformed.
    pub fn with_extra_command(mut self, command: &str) -> Self {
        self.extra_args
            .extend(command.split_whitespace().map(str::to_string));
        self
    }
}

/// One downloader invocation plus the link it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub program: String,
    pub args: Vec<String>,
    pub title: String,
    pub url: String,
    /// Where the audio file is expected to land.
    pub output_path: PathBuf,
}

impl Job {
    /// Title if the line had one, else the URL.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build the invocation for `link`. `label` is the sequence label, or empty when
/// indexing is disabled.
///
/// Argument order is fixed: format selection, audio extraction, quality and
/// codec, extra args, then `-o <path>` and the URL.
pub fn build_job(opts: &JobOptions, link: &ParsedLink, label: &str) -> Job {
    let ext = opts.audio_format.as_str();
    let prefix_len = if label.is_empty() {
        0
    } else {
        label.len() + LABEL_SEPARATOR.len()
    };
    let budget = NAME_MAX.saturating_sub(prefix_len + ext.len() + 1);
    let title = sanitize_title(&link.title, budget);

    let stem = match (label.is_empty(), title.is_empty()) {
        (false, false) => format!("{label}{LABEL_SEPARATOR}{title}"),
        (false, true) => label.to_string(),
        (true, _) => title,
    };

    let (output_path, output_template) = if stem.is_empty() {
        let file_template = format!("{REMOTE_TITLE_TEMPLATE}.{ext}");
        (
            opts.output_dir.join(&file_template),
            escape_dir(&opts.output_dir).join(&file_template),
        )
    } else {
        let file_name = format!("{stem}.{ext}");
        let template = escape_dir(&opts.output_dir).join(escape_template(&file_name));
        (opts.output_dir.join(file_name), template)
    };

    let mut args: Vec<String> = vec![
        "-f".to_string(),
        opts.format_selector.clone(),
        "--extract-audio".to_string(),
        "--audio-quality".to_string(),
        opts.audio_quality.clone(),
        "--audio-format".to_string(),
        ext.to_string(),
    ];
    args.extend(opts.extra_args.iter().cloned());
    args.push("-o".to_string());
    args.push(output_template.to_string_lossy().into_owned());
    args.push(link.url.clone());

    Job {
        program: opts.program.clone(),
        args,
        title: link.title.clone(),
        url: link.url.clone(),
        output_path,
    }
}

/// Make a title safe as a single Linux filename component.
///
/// - Replaces NUL, `/` and control characters with `_`
/// - Trims surrounding whitespace
/// - Limits length to `max_len` bytes on a char boundary
fn sanitize_title(title: &str, max_len: usize) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c == '/' || c.is_control() { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.len() <= max_len {
        return trimmed.to_string();
    }
    let mut take = max_len;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].trim_end().to_string()
}

/// The downloader expands `%(...)` in `-o`; literal `%` must be doubled.
fn escape_template(s: &str) -> String {
    s.replace('%', "%%")
}

fn escape_dir(dir: &Path) -> PathBuf {
    PathBuf::from(escape_template(&dir.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> JobOptions {
        JobOptions::from_config(&AudlConfig::default(), "/music")
    }

    fn link(title: &str, url: &str) -> ParsedLink {
        ParsedLink {
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn builds_fixed_argument_order() {
        let job = build_job(&opts(), &link("Song A", "https://x.org/1"), "01");
        assert_eq!(job.program, "yt-dlp");
        assert_eq!(
            job.args,
            vec![
                "-f",
                "bestaudio/best",
                "--extract-audio",
                "--audio-quality",
                "0",
                "--audio-format",
                "opus",
                "-o",
                "/music/01 - Song A.opus",
                "https://x.org/1",
            ]
        );
        assert_eq!(job.output_path, PathBuf::from("/music/01 - Song A.opus"));
        assert_eq!(job.title, "Song A");
        assert_eq!(job.url, "https://x.org/1");
    }

    #[test]
    fn extra_args_go_before_output_flag() {
        let opts = opts().with_extra_command("  --embed-thumbnail   --no-playlist ");
        let job = build_job(&opts, &link("T", "https://x.org/1"), "");
        let n = job.args.len();
        assert_eq!(job.args[7], "--embed-thumbnail");
        assert_eq!(job.args[8], "--no-playlist");
        assert_eq!(job.args[n - 2], "/music/T.opus");
        assert_eq!(job.args[n - 1], "https://x.org/1");
    }

    #[test]
    fn mp3_format_changes_flag_and_extension() {
        let mut opts = opts();
        opts.audio_format = AudioFormat::Mp3;
        let job = build_job(&opts, &link("Song", "https://x.org/1"), "03");
        assert!(job.args.windows(2).any(|w| w == ["--audio-format", "mp3"]));
        assert_eq!(job.output_path, PathBuf::from("/music/03 - Song.mp3"));
    }

    #[test]
    fn empty_title_with_label_drops_separator() {
        let job = build_job(&opts(), &link("", "https://x.org/2"), "02");
        assert_eq!(job.output_path, PathBuf::from("/music/02.opus"));
        assert_eq!(job.display_name(), "https://x.org/2");
    }

    #[test]
    fn empty_title_without_label_uses_remote_title() {
        let job = build_job(&opts(), &link("", "https://x.org/2"), "");
        assert_eq!(job.output_path, PathBuf::from("/music/%(title)s.opus"));
        let o = job.args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(job.args[o + 1], "/music/%(title)s.opus");
    }

    #[test]
    fn percent_in_title_is_escaped_for_downloader_only() {
        let job = build_job(&opts(), &link("100% Pure", "https://x.org/1"), "01");
        assert_eq!(job.output_path, PathBuf::from("/music/01 - 100% Pure.opus"));
        let o = job.args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(job.args[o + 1], "/music/01 - 100%% Pure.opus");
    }

    #[test]
    fn slash_in_title_does_not_create_directories() {
        let job = build_job(&opts(), &link("AC/DC - Thunder", "https://x.org/1"), "");
        assert_eq!(job.output_path, PathBuf::from("/music/AC_DC - Thunder.opus"));
    }

    #[test]
    fn long_titles_fit_name_max() {
        let long = "é".repeat(300);
        let job = build_job(&opts(), &link(&long, "https://x.org/1"), "001");
        let name = job.output_path.file_name().unwrap().to_str().unwrap();
        assert!(name.len() <= NAME_MAX, "len {}", name.len());
        assert!(name.starts_with("001 - é"));
        assert!(name.ends_with(".opus"));
    }

    #[test]
    fn unlabelled_long_titles_use_full_name_max() {
        let long = "a".repeat(300);
        let job = build_job(&opts(), &link(&long, "https://x.org/1"), "");
        let name = job.output_path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), NAME_MAX);
        assert!(name.ends_with(".opus"));
    }

    #[test]
    fn display_is_program_and_args() {
        let job = build_job(&opts(), &link("A", "https://x.org/1"), "");
        let shown = job.to_string();
        assert!(shown.starts_with("yt-dlp -f bestaudio/best --extract-audio"));
        assert!(shown.ends_with("-o /music/A.opus https://x.org/1"));
    }

    #[test]
    fn build_is_pure() {
        let opts = opts();
        let l = link("Same", "https://x.org/1");
        assert_eq!(build_job(&opts, &l, "05"), build_job(&opts, &l, "05"));
    }
}
