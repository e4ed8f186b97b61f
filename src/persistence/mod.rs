//! JSON document storage
//!
//! Every persisted document is a small JSON file inside one data directory.
//! Reads never fail: a missing or unreadable file is reported as `None` and
//! the caller falls back to its default. Writes go straight to the target
//! file; a failed write leaves the previous contents and is only logged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Score board document
pub const SCORES_FILE: &str = "scores.json";
/// Skin progression document
pub const PROGRESSION_FILE: &str = "skins.json";
/// Runtime settings document
pub const SETTINGS_FILE: &str = "settings.json";

/// A data directory holding the game's documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scores_path(&self) -> PathBuf {
        self.root.join(SCORES_FILE)
    }

    pub fn progression_path(&self) -> PathBuf {
        self.root.join(PROGRESSION_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }
}

/// Read and parse a JSON document.
///
/// Returns None when the file is missing, unreadable or not valid JSON.
pub fn read_json(path: &Path) -> Option<Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found, using defaults", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Serialize `value` as pretty JSON, creating the parent directory if needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}

/// Write a document, logging instead of propagating failures
pub fn save_or_warn<T: Serialize + ?Sized>(path: &Path, value: &T, what: &str) {
    match write_json(path, value) {
        Ok(()) => log::info!("{} saved to {}", what, path.display()),
        Err(e) => log::warn!("Failed to save {} to {}: {}", what, path.display(), e),
    }
}

/// Fresh scratch directory for persistence tests
#[cfg(test)]
pub(crate) fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snake-arcade-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}
