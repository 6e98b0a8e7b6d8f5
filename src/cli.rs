use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::args::*;
use crate::config::{Config, ConfigStore};
use crate::discovery;
use crate::error::InitError;
use crate::initializer::{self, Prompter};
use crate::savefiles;
use crate::utils::fs_utils;
use crate::watcher;

// Runs the CLI application
pub fn run(args: SaveManagerArgs) -> Result<()> {
    let command = args
        .command()
        .ok_or_else(|| anyhow!("no command given, see --help"))?;

    let store = ConfigStore::new(&args.config);
    let config = load_or_init(&store, args.steam_root.as_deref())?;

    // Handle arguments
    match command {
        Commands::Save { message } => {
            save(&config, &savefiles::build_save_name(&message))?;
        }
        Commands::Load { source } => load(&config, &source)?,
        Commands::List => list(&config, &mut io::stdout().lock())?,
        Commands::Autosave => watcher::watch(&config.steam_dir, &config.saves_dir)
            .context("autosave stopped")?,
    }
    Ok(())
}

fn load_or_init(store: &ConfigStore, steam_root: Option<&Path>) -> Result<Config> {
    if !store.exists() {
        let steam_root = match steam_root {
            Some(root) => root.to_path_buf(),
            None => discovery::default_steam_userdata().ok_or(InitError::UnknownSteamRoot)?,
        };
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        initializer::init(&mut prompter, store, &steam_root).context("first run setup failed")?;
    }

    store.load().context("error loading config")
}

// Snapshots the source directory into `saves_dir/name`
pub fn save(config: &Config, name: &str) -> Result<PathBuf> {
    let target = config.saves_dir.join(name);
    let copied = fs_utils::copy_dir(&config.steam_dir, &target)
        .context("error copying save files")?;

    info!(snapshot = %target.display(), files = copied, "saved");
    Ok(target)
}

// Absolute paths are used as given, anything else names a snapshot
pub fn resolve_load_source(config: &Config, source: &Path) -> PathBuf {
    if source.is_absolute() {
        source.to_path_buf()
    } else {
        config.saves_dir.join(source)
    }
}

pub fn load(config: &Config, source: &Path) -> Result<()> {
    let source = resolve_load_source(config, source);
    let copied = fs_utils::copy_dir(&source, &config.steam_dir)
        .context("error copying save files")?;

    info!(snapshot = %source.display(), files = copied, "loaded");
    Ok(())
}

pub fn list<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let names = fs_utils::list_dirs(&config.saves_dir).with_context(|| {
        format!("error reading directory {}", config.saves_dir.display())
    })?;
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
