use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::CONFIG_FILE_NAME;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Save and restore save files for Dragon's Dogma 2",
    group(
        ArgGroup::new("action")
            .required(true)
            .args(["save", "load", "list", "autosave"])
    )
)]
// Program arguments
pub struct SaveManagerArgs {
    /// Save current save files, optionally tagged with a message
    #[arg(long, value_name = "MESSAGE", num_args = 0..)]
    pub save: Option<Vec<String>>,

    /// Load save files from a snapshot name or an absolute path
    #[arg(long, value_name = "NAME|PATH")]
    pub load: Option<PathBuf>,

    /// List all saved snapshots
    #[arg(long)]
    pub list: bool,

    /// Save files automatically whenever the game writes them
    #[arg(long)]
    pub autosave: bool,

    /// Settings file, created on first run
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Where to look for the game's save directory on first run
    #[arg(long, value_name = "DIR")]
    pub steam_root: Option<PathBuf>,
}

// Command types
#[derive(Debug, PartialEq, Eq)]
pub enum Commands {
    Save { message: String },
    Load { source: PathBuf },
    List,
    Autosave,
}

impl SaveManagerArgs {
    pub fn command(&self) -> Option<Commands> {
        if let Some(words) = &self.save {
            return Some(Commands::Save {
                message: words.join(" ").trim().to_string(),
            });
        }
        if let Some(source) = &self.load {
            return Some(Commands::Load {
                source: source.clone(),
            });
        }
        if self.list {
            return Some(Commands::List);
        }
        if self.autosave {
            return Some(Commands::Autosave);
        }
        None
    }
}
