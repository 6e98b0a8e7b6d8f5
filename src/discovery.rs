use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::debug;

use crate::error::DiscoveryError;

// Dragon's Dogma 2 app id, then the Steam Cloud save folder
pub const SAVE_SUBPATH: [&str; 3] = ["2054970", "remote", "win64_save"];

#[cfg(windows)]
pub fn default_steam_userdata() -> Option<PathBuf> {
    Some(PathBuf::from(r"C:\Program Files (x86)\Steam\userdata"))
}

#[cfg(not(windows))]
pub fn default_steam_userdata() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".local/share/Steam/userdata"))
}

fn save_subpath() -> PathBuf {
    SAVE_SUBPATH.iter().collect()
}

/// Finds every directory under `root`, at any depth, whose path ends with
/// [`SAVE_SUBPATH`]. Results are sorted; a missing root gives no matches.
pub fn find_save_dirs(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.is_dir() {
        debug!(root = %root.display(), "search root does not exist");
        return Ok(Vec::new());
    }

    let root_pattern = Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{root_pattern}/**/{}", SAVE_SUBPATH.join("/"));
    let options = MatchOptions {
        case_sensitive: !cfg!(windows),
        ..MatchOptions::new()
    };

    let suffix = save_subpath();
    let mut dirs = Vec::new();
    for entry in glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_dir() && path.ends_with(&suffix) {
            dirs.push(path);
        }
    }
    dirs.sort();
    dirs.dedup();

    Ok(dirs)
}
