//! Link list parsing.
//!
//! One entry per line: an optional free-text title followed by an `https://`
//! URL. Blank lines and lines starting with `--` are skipped before parsing.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const SCHEME: &str = "https://";
const OPTION_PREFIX: &str = "--";

/// A title/URL pair recovered from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    /// Text before the URL, trimmed. May be empty.
    pub title: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no URL found in line: {line}")]
    NoUrl { line: String },
    #[error("invalid URL in line: {line}")]
    InvalidUrl {
        line: String,
        #[source]
        source: url::ParseError,
    },
}

/// Splits `line` at the first `https://`.
///
/// # Examples
///
/// - `"Song A https://x.org/1"` → title `"Song A"`, url `"https://x.org/1"`
/// - `"https://x.org/2"` → title `""`, url `"https://x.org/2"`
pub fn parse_link(line: &str) -> Result<ParsedLink, ParseError> {
    let Some((title, rest)) = line.split_once(SCHEME) else {
        return Err(ParseError::NoUrl {
            line: line.to_string(),
        });
    };
    let url = format!("{SCHEME}{rest}");
    if let Err(source) = url::Url::parse(&url) {
        return Err(ParseError::InvalidUrl {
            line: line.to_string(),
            source,
        });
    }
    Ok(ParsedLink {
        title: title.trim().to_string(),
        url,
    })
}

/// Trimmed lines that should be handed to [`parse_link`], in file order.
pub fn link_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(OPTION_PREFIX))
}

/// Result of parsing a whole link file. Rejected lines never become jobs.
#[derive(Debug, Default)]
pub struct LinkList {
    pub links: Vec<ParsedLink>,
    pub rejected: Vec<ParseError>,
}

impl LinkList {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

pub fn parse_links(text: &str) -> LinkList {
    let mut list = LinkList::default();
    for line in link_lines(text) {
        match parse_link(line) {
            Ok(link) => list.links.push(link),
            Err(e) => list.rejected.push(e),
        }
    }
    list
}

/// Read and parse the link file at `path`.
pub fn load_links(path: &Path) -> Result<LinkList> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read link file {}", path.display()))?;
    let list = parse_links(&text);
    tracing::debug!(
        path = %path.display(),
        links = list.links.len(),
        rejected = list.rejected.len(),
        "loaded link file"
    );
    Ok(list)
}
