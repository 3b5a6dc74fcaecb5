use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::game::types::{Difficulty, Statistics};

/// An RGB color as stored in the settings file.
pub type Rgb = [u8; 3];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no usable data directory")]
    NoDataDir,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub x_color: Rgb,
    pub o_color: Rgb,
    /// In games against the computer, let it place the first O before X moves.
    pub computer_begins: bool,
    // Optional persisted window geometry (absent on first run)
    pub window_width: Option<i32>,
    pub window_height: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            x_color: [0, 0, 255],
            o_color: [255, 0, 0],
            computer_begins: false,
            window_width: None,
            window_height: None,
        }
    }
}

/// Persistence for the cumulative win/draw counters.
pub trait StatsStore {
    /// Never fails: a missing or unreadable record yields zeroed statistics.
    fn load(&self) -> Statistics;
    fn save(&self, stats: &Statistics) -> Result<(), StorageError>;
}

/// Resolve the directory holding `settings.json` and `statistics.json`,
/// creating it if needed.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match ProjectDirs::from("io.github", "tictactoe", "TicTacToe") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        // Fallback to current directory
        None => std::env::current_dir().map_err(|_| StorageError::NoDataDir)?,
    };
    fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Stats kept as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("statistics.json"))
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonStatsStore {
    fn load(&self) -> Statistics {
        read_json_or_default(&self.path)
    }

    fn save(&self, stats: &Statistics) -> Result<(), StorageError> {
        write_json(&self.path, stats)
    }
}

/// Settings kept as a JSON file next to the statistics.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("settings.json"))
    }

    pub fn load(&self) -> Settings {
        read_json_or_default(&self.path)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        write_json(&self.path, settings)
    }

    /// Load, apply `edit`, save. Save failures are logged.
    pub fn update(&self, edit: impl FnOnce(&mut Settings)) -> Settings {
        let mut settings = self.load();
        edit(&mut settings);
        if let Err(e) = self.save(&settings) {
            warn!(error = %e, "failed to save settings");
        }
        settings
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read file, using defaults");
            return T::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt file, using defaults");
            T::default()
        }
    }
}

/// Write through a sibling temp file and rename it over the target, so the
/// target always holds either the old or the new record.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let data = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, data.as_bytes()).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
