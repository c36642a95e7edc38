//! Runtime configuration
//!
//! Command-line options are turned into an [`AppConfig`]; the persisted tile
//! count lives in [`settings`].

pub mod settings;

pub use settings::{SettingsError, SettingsStore};

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::app::controller::ControllerConfig;
use crate::cli::Args;
use crate::domain::grid::{GridError, TileCount};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tile count: {0}")]
    TileCount(#[from] GridError),
    #[error("Poll interval must be at least one millisecond")]
    ZeroPollInterval,
}

/// Settings for one run of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tile count override; `None` uses the stored value
    pub tile_count: Option<TileCount>,
    /// Time between foreground window checks
    pub poll_interval: Duration,
    /// Upper bound on the foreground waits; `None` waits indefinitely
    pub target_timeout: Option<Duration>,
    /// Where the tile count is persisted; `None` disables persistence
    pub settings_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tile_count: None,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            target_timeout: None,
            settings_path: settings::default_path(),
        }
    }
}

impl AppConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(Self {
            tile_count: args.tiles.map(TileCount::new).transpose()?,
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            target_timeout: args.target_timeout_secs.map(Duration::from_secs),
            settings_path: args.settings.clone().or_else(settings::default_path),
        })
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.settings_path.clone())
    }

    /// Override if given, otherwise whatever `store` holds
    pub fn initial_tile_count(&self, store: &SettingsStore) -> TileCount {
        self.tile_count.unwrap_or_else(|| store.load())
    }

    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            poll_interval: self.poll_interval,
            target_timeout: self.target_timeout,
        }
    }
}
