use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::{CopyError, WatchError};
use crate::savefiles;
use crate::utils::fs_utils;

pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(5);

/// Drops events that arrive within `window` of the last accepted one.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) => now.saturating_duration_since(last) > self.window,
            None => true,
        }
    }

    pub fn accept(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }
}

// Writes and creations, including a temp file renamed over a save
fn is_save_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To))
    )
}

pub struct Autosaver {
    source: PathBuf,
    saves_dir: PathBuf,
    debounce: Debounce,
}

impl Autosaver {
    pub fn new(source: impl Into<PathBuf>, saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            saves_dir: saves_dir.into(),
            debounce: Debounce::new(DEBOUNCE_WINDOW),
        }
    }

    /// Takes a snapshot for a qualifying event unless it falls in the
    /// debounce window. Returns the snapshot directory when one was written.
    pub fn handle(&mut self, event: &Event, now: Instant) -> Result<Option<PathBuf>, CopyError> {
        if !is_save_write(&event.kind) {
            return Ok(None);
        }
        let Some(changed) = event.paths.first() else {
            return Ok(None);
        };
        if !self.debounce.is_ready(now) {
            debug!(path = %changed.display(), "inside debounce window, skipped");
            return Ok(None);
        }

        let modified = match fs::metadata(changed).and_then(|meta| meta.modified()) {
            Ok(time) => time,
            Err(e) => {
                warn!(path = %changed.display(), "failed to get file info: {e}");
                return Ok(None);
            }
        };

        let target = self
            .saves_dir
            .join(savefiles::name_from_system_time(modified));
        let copied = fs_utils::copy_dir(&self.source, &target)?;
        self.debounce.accept(now);

        info!(
            snapshot = %target.display(),
            files = copied,
            "autosaved after change to {}",
            changed.display()
        );
        Ok(Some(target))
    }

    /// Handles events until the source runs dry. Copy failures end the loop.
    pub fn run<I>(&mut self, events: I) -> Result<(), CopyError>
    where
        I: IntoIterator<Item = notify::Result<Event>>,
    {
        for res in events {
            match res {
                Ok(event) => {
                    self.handle(&event, Instant::now())?;
                }
                Err(e) => warn!("watch error: {e}"),
            }
        }
        Ok(())
    }
}

/// Watches `source` recursively and snapshots it into `saves_dir` on change.
/// Blocks until the watcher shuts down.
pub fn watch(source: &Path, saves_dir: &Path) -> Result<(), WatchError> {
    let setup_error = |source_err| WatchError::Setup {
        path: source.to_path_buf(),
        source: source_err,
    };

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(setup_error)?;
    watcher
        .watch(source, RecursiveMode::Recursive)
        .map_err(setup_error)?;

    info!(
        source = %source.display(),
        saves = %saves_dir.display(),
        "watching for save changes"
    );
    let mut autosaver = Autosaver::new(source, saves_dir);
    autosaver.run(rx)?;

    info!("watcher closed");
    Ok(())
}
