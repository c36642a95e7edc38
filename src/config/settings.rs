//! Persisted tile count
//!
//! The last tile count used for a successful placement is stored as a single
//! byte. Missing or unreadable files fall back to the default count.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::grid::TileCount;

/// File name inside the user's configuration directory
pub const SETTINGS_FILE_NAME: &str = "screen_tile.set";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No settings location available")]
    NoLocation,
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads and writes the persisted tile count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Store backed by `path`, or a store that never persists when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Store at [`default_path`]
    pub fn at_default_location() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the stored tile count
    ///
    /// Values outside [2, 9] are clamped. Any failure yields the default.
    pub fn load(&self) -> TileCount {
        let Some(path) = &self.path else {
            return TileCount::default();
        };

        match fs::read(path) {
            Ok(bytes) => match bytes.first() {
                Some(&byte) => TileCount::clamped(byte),
                None => {
                    debug!(path = %path.display(), "settings file is empty");
                    TileCount::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => TileCount::default(),
            Err(err) => {
                debug!(path = %path.display(), %err, "failed to read settings");
                TileCount::default()
            }
        }
    }

    /// Stores `count` as a single byte
    pub fn save(&self, count: TileCount) -> Result<(), SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoLocation)?;
        let write_err = |source| SettingsError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, [count.as_byte()]).map_err(write_err)
    }
}

/// `<config dir>/screen_tile.set` (`%APPDATA%` on Windows)
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
}
