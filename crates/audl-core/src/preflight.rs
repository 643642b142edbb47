//! Startup check that required executables are installed.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("{tool} not found on PATH")]
    NotFound { tool: String },
}

fn bin_name(tool: &str) -> String {
    if cfg!(target_os = "windows") && Path::new(tool).extension().is_none() {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve `tool` against the directories in `path_var` (a `PATH`-style list).
/// A tool given with a directory component is checked as-is.
pub fn find_executable_in(tool: &str, path_var: &OsStr) -> Option<PathBuf> {
    let name = bin_name(tool);
    let direct = Path::new(&name);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&name))
        .find(|candidate| is_executable(candidate))
}

/// Resolve `tool` against the process `PATH`.
pub fn find_executable(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_executable_in(tool, &path_var)
}

/// Fails on the first tool that cannot be resolved. Returns resolved paths in input order.
pub fn require_tools(tools: &[&str]) -> Result<Vec<PathBuf>, PreflightError> {
    tools
        .iter()
        .map(|tool| -> Result<PathBuf, PreflightError> {
            let found = find_executable(tool).ok_or_else(|| PreflightError::NotFound {
                tool: tool.to_string(),
            })?;
            tracing::debug!(tool, path = %found.display(), "found required tool");
            Ok(found)
        })
        .collect()
}
