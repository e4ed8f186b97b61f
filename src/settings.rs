//! Runtime settings
//!
//! Stored as `settings.json` in the data directory. The data directory
//! itself comes from `SNAKE_ARCADE_DATA_DIR` (default `./data`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};

/// Frame pacing for the driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pacing {
    /// Sleep for the session's tick interval between frames
    #[default]
    RealTime,
    /// No waiting (attract mode, benchmarks)
    Turbo,
}

impl Pacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::RealTime => "RealTime",
            Pacing::Turbo => "Turbo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "realtime" | "real-time" | "real_time" => Some(Pacing::RealTime),
            "turbo" | "fast" => Some(Pacing::Turbo),
            _ => None,
        }
    }

    /// Time to wait after a frame at the given tick interval
    pub fn frame_wait(&self, tick_interval: Duration) -> Duration {
        match self {
            Pacing::RealTime => tick_interval,
            Pacing::Turbo => Duration::ZERO,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where scores, skins and settings live
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Frame pacing
    pub pacing: Pacing,
    /// Runs the autopilot plays before quitting
    pub autopilot_runs: u32,
    /// Safety cap on ticks per run
    pub max_ticks_per_run: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            pacing: Pacing::RealTime,
            autopilot_runs: 3,
            max_ticks_per_run: 5_000,
        }
    }
}

impl Settings {
    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &'static str = "SNAKE_ARCADE_DATA_DIR";
    const DEFAULT_DATA_DIR: &'static str = "data";

    /// Data directory from the environment, or the default
    pub fn data_dir_from_env() -> PathBuf {
        std::env::var_os(Self::DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIR))
    }

    /// Load settings from the environment's data directory
    pub fn load() -> Self {
        Self::load_from(&Self::data_dir_from_env())
    }

    /// Load settings stored in `data_dir` (defaults when missing or invalid)
    pub fn load_from(data_dir: &Path) -> Self {
        let storage = Storage::new(data_dir);
        let mut settings = persistence::read_json(&storage.settings_path())
            .and_then(|value| match serde_json::from_value::<Settings>(value) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", storage.settings_path().display());
                    Some(settings)
                }
                Err(e) => {
                    log::warn!("Invalid settings file, using defaults: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        settings.data_dir = data_dir.to_path_buf();
        settings
    }

    /// Save settings; failures are logged
    pub fn save(&self) {
        persistence::save_or_warn(&self.storage().settings_path(), self, "Settings");
    }

    /// Document storage rooted at the data directory
    pub fn storage(&self) -> Storage {
        Storage::new(&self.data_dir)
    }
}
