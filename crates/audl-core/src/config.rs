use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Audio codec requested from the downloader; also decides the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Opus,
    Mp3,
}

impl AudioFormat {
    /// Value passed to `--audio-format` and used as the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Opus => "opus",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown audio format {0:?} (expected \"opus\" or \"mp3\")")]
pub struct UnknownAudioFormat(pub String);

impl FromStr for AudioFormat {
    type Err = UnknownAudioFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opus" => Ok(AudioFormat::Opus),
            "mp3" => Ok(AudioFormat::Mp3),
            _ => Err(UnknownAudioFormat(s.to_string())),
        }
    }
}

/// Global configuration loaded from `~/.config/audl/config.toml`.
///
/// Every key is optional in the file; missing keys take the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudlConfig {
    /// Downloader executable invoked once per link.
    pub downloader: String,
    /// Media toolkit the downloader needs for audio extraction. Checked, never invoked.
    pub media_toolkit: String,
    /// Number of concurrent downloads when `--batch` is not given.
    pub batch: usize,
    /// Audio codec when `--audio-format` is not given.
    pub audio_format: AudioFormat,
    /// Value for the downloader's `-f` format selection flag.
    pub format_selector: String,
    /// Value for the downloader's `--audio-quality` flag (0 = best).
    pub audio_quality: String,
}

impl Default for AudlConfig {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            media_toolkit: "ffmpeg".to_string(),
            batch: 6,
            audio_format: AudioFormat::Opus,
            format_selector: "bestaudio/best".to_string(),
            audio_quality: "0".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("audl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AudlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AudlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AudlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
