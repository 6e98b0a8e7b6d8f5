use std::io;
use std::path::PathBuf;

use thiserror::Error;

// Settings file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("config file {} is malformed: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("failed to write config file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

// Directory copy errors, the walk stops at the first one
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("source directory {} does not exist", .0.display())]
    SourceMissing(PathBuf),
    #[error("destination {} is inside source {}", dst.display(), src.display())]
    DestinationInsideSource { src: PathBuf, dst: PathBuf },
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to search for save directories: {0}")]
    Glob(#[from] glob::GlobError),
}

// First-run setup errors
#[derive(Debug, Error)]
pub enum InitError {
    #[error("please enter a directory path")]
    EmptyPath,
    #[error("directory {} not found", .0.display())]
    DirNotFound(PathBuf),
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("no Steam save directory found under {}", .0.display())]
    SaveDirNotFound(PathBuf),
    #[error("Steam userdata location is unknown on this system, pass --steam-root")]
    UnknownSteamRoot,
    #[error("invalid number {input:?}, expected 0..{count}")]
    InvalidSelection { input: String, count: usize },
    #[error("failed to read answer: {0}")]
    Prompt(#[from] io::Error),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to watch {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        source: notify::Error,
    },
    #[error(transparent)]
    Copy(#[from] CopyError),
}
