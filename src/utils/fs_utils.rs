use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CopyError;

// Canonical form of a path that may not exist yet: the deepest existing
// ancestor is resolved and the missing tail appended as is
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let path = std::path::absolute(path)?;
    let mut tail = Vec::new();
    let mut current = path.as_path();
    loop {
        if let Ok(resolved) = current.canonicalize() {
            return Ok(tail.iter().rev().fold(resolved, |acc, part| acc.join(part)));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                current = parent;
            }
            _ => return Ok(path),
        }
    }
}

/// Copies every regular file under `src` to the same relative path under
/// `dst`. Directories are only created as parents of copied files, so empty
/// directories in `src` do not appear in `dst`. Stops at the first failure
/// without removing what was already copied. Returns the number of files.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<u64, CopyError> {
    if !src.is_dir() {
        return Err(CopyError::SourceMissing(src.to_path_buf()));
    }

    let abs_src = resolve(src).map_err(|source| CopyError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    let abs_dst = resolve(dst).map_err(|source| CopyError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    if abs_dst.starts_with(&abs_src) {
        return Err(CopyError::DestinationInsideSource {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|source| CopyError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        // WalkDir yields paths prefixed with `src`
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::copy(entry.path(), &target).map_err(|source| CopyError::Copy {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source,
        })?;
        debug!(file = %relative.display(), "copied");
        copied += 1;
    }

    Ok(copied)
}

/// Names of the immediate subdirectories of `dir`, sorted.
pub fn list_dirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
