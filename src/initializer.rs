use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Config, ConfigStore};
use crate::discovery;
use crate::error::InitError;

// Question/answer over any reader and writer, stdin/stdout in the binary
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }
}

fn choose_save_dir<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    steam_root: &Path,
) -> Result<PathBuf, InitError> {
    let mut found = discovery::find_save_dirs(steam_root)?;
    match found.len() {
        0 => Err(InitError::SaveDirNotFound(steam_root.to_path_buf())),
        1 => Ok(found.remove(0)),
        count => {
            prompter.say("Multiple Steam directories found")?;
            for (i, dir) in found.iter().enumerate() {
                prompter.say(&format!("{i}) {}", dir.display()))?;
            }

            let answer = prompter.ask("Enter number of Steam directory: ")?;
            match answer.parse::<usize>() {
                Ok(index) if index < count => Ok(found.swap_remove(index)),
                _ => Err(InitError::InvalidSelection {
                    input: answer,
                    count,
                }),
            }
        }
    }
}

/// First-run setup. Asks where to keep snapshots, an optional character
/// name, locates the game's save directory under `steam_root` and persists
/// the result. Nothing is written unless every step succeeds.
pub fn init<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &ConfigStore,
    steam_root: &Path,
) -> Result<Config, InitError> {
    let base = prompter.ask("Enter directory path for store DD2 save-files: ")?;
    if base.is_empty() {
        return Err(InitError::EmptyPath);
    }
    let base = PathBuf::from(base);
    if !base.is_dir() {
        return Err(InitError::DirNotFound(base));
    }

    let character = prompter.ask("Enter character name or leave empty: ")?;
    let character = (!character.is_empty()).then_some(character);
    let saves_dir = match &character {
        Some(name) => base.join(name),
        None => base,
    };

    let steam_dir = choose_save_dir(prompter, steam_root)?;

    // The per-character folder is created last so a failed setup leaves no trace
    fs::create_dir_all(&saves_dir).map_err(|source| InitError::CreateDir {
        path: saves_dir.clone(),
        source,
    })?;

    let config = Config {
        saves_dir,
        steam_dir,
        character,
    };
    store.save(&config)?;
    info!(path = %store.path().display(), "config saved");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::error::ConfigError;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    struct Setup {
        _dir: TempDir,
        archive: PathBuf,
        steam_root: PathBuf,
        store: ConfigStore,
    }

    fn setup(users: &[&str]) -> Setup {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("archive");
        let steam_root = dir.path().join("userdata");
        fs::create_dir_all(&archive).unwrap();
        fs::create_dir_all(&steam_root).unwrap();
        for user in users {
            let save = discovery::SAVE_SUBPATH
                .iter()
                .fold(steam_root.join(user), |acc, part| acc.join(part));
            fs::create_dir_all(save).unwrap();
        }
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
        Setup {
            _dir: dir,
            archive,
            steam_root,
            store,
        }
    }

    fn run(setup: &Setup, answers: &str) -> (Result<Config, InitError>, String) {
        let mut output = Vec::<u8>::new();
        let mut prompter = Prompter::new(Cursor::new(answers.to_string()), &mut output);
        let result = init(&mut prompter, &setup.store, &setup.steam_root);
        (result, String::from_utf8(output).unwrap())
    }

    fn expected_save(setup: &Setup, user: &str) -> PathBuf {
        discovery::find_save_dirs(&setup.steam_root)
            .unwrap()
            .into_iter()
            .find(|p| p.starts_with(setup.steam_root.join(user)))
            .unwrap()
    }

    #[test]
    fn single_match_without_character() {
        let setup = setup(&["111"]);
        let answers = format!("{}\n\n", setup.archive.display());

        let (result, _) = run(&setup, &answers);
        let config = result.unwrap();

        assert_eq!(config.saves_dir, setup.archive);
        assert_eq!(config.steam_dir, expected_save(&setup, "111"));
        assert_eq!(config.character, None);
        assert_eq!(setup.store.load().unwrap(), config);
    }

    #[test]
    fn character_name_selects_subdirectory() {
        let setup = setup(&["111"]);
        let answers = format!("{}\n  Arisen \n", setup.archive.display());

        let (result, _) = run(&setup, &answers);
        let config = result.unwrap();

        assert_eq!(config.saves_dir, setup.archive.join("Arisen"));
        assert!(config.saves_dir.is_dir());
        assert_eq!(config.character.as_deref(), Some("Arisen"));
    }

    #[test]
    fn empty_destination_is_rejected() {
        let setup = setup(&["111"]);

        let (result, _) = run(&setup, "\n");

        assert!(matches!(result, Err(InitError::EmptyPath)));
        assert!(!setup.store.exists());
    }

    #[test]
    fn missing_destination_is_rejected() {
        let setup = setup(&["111"]);
        let answers = format!("{}\n\n", setup.archive.join("nope").display());

        let (result, _) = run(&setup, &answers);

        assert!(matches!(result, Err(InitError::DirNotFound(_))));
        assert!(!setup.store.exists());
    }

    #[test]
    fn no_save_directory_found() {
        let setup = setup(&[]);
        let answers = format!("{}\nArisen\n", setup.archive.display());

        let (result, _) = run(&setup, &answers);

        assert!(matches!(result, Err(InitError::SaveDirNotFound(_))));
        assert!(!setup.store.exists());
        assert!(!setup.archive.join("Arisen").exists());
    }

    #[test]
    fn multiple_matches_are_listed_and_selected() {
        let setup = setup(&["111", "222"]);
        let answers = format!("{}\n\n1\n", setup.archive.display());

        let (result, output) = run(&setup, &answers);
        let config = result.unwrap();

        assert!(output.contains("0) "));
        assert!(output.contains("1) "));
        assert_eq!(config.steam_dir, expected_save(&setup, "222"));
        assert_eq!(setup.store.load().unwrap(), config);
    }

    #[test]
    fn out_of_range_selection_writes_no_config() {
        let setup = setup(&["111", "222"]);
        let answers = format!("{}\n\n2\n", setup.archive.display());

        let (result, output) = run(&setup, &answers);

        assert!(output.contains("0) "));
        assert!(output.contains("1) "));
        assert!(!output.contains("2) "));
        assert!(matches!(
            result,
            Err(InitError::InvalidSelection { count: 2, .. })
        ));
        assert!(matches!(setup.store.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn non_numeric_selection_is_rejected() {
        let setup = setup(&["111", "222"]);
        let answers = format!("{}\n\nfirst\n", setup.archive.display());

        let (result, _) = run(&setup, &answers);

        assert!(matches!(result, Err(InitError::InvalidSelection { .. })));
        assert!(!setup.store.exists());
    }
}
