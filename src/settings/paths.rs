use std::env;
use std::path::{Path, PathBuf};

use super::store::SETTINGS_FILE;

/// What: Locate the project root for a starting directory.
///
/// Inputs:
/// - `start`: Directory to start searching from (usually the current directory)
///
/// Output:
/// - `Some(PathBuf)` of the first ancestor (including `start`) holding a
///   `frontmatter.json`, or `None` when no ancestor has one
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(SETTINGS_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_STATE_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Logs directory: "$XDG_STATE_HOME/content-i18n" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_STATE_HOME", &[".local", "state"]).join("content-i18n");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
