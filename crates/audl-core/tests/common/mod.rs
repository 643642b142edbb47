#[cfg(unix)]
pub mod fake_downloader;
