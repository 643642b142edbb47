//! A stand-in downloader script: writes the URL into the `-o` path, or fails
//! when the URL contains `fail`.

use std::fs;
use std::path::{Path, PathBuf};

const SCRIPT: &str = r#"#!/bin/sh
out=""
while [ $# -gt 1 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
url="$1"
case "$url" in
  *fail*) echo "ERROR: unavailable: $url" >&2; exit 1 ;;
esac
printf '%s' "$url" > "$out"
"#;

/// Install the script as `fake-dl` inside `dir` and return its path.
pub fn install(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-dl");
    fs::write(&path, SCRIPT).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
