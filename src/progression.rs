//! Skin unlock economy
//!
//! Skins are unlocked by reaching their cost with the best score ever
//! recorded. The record of unlocked skins and the active one is persisted
//! as `{ "unlocked": [...], "active": "..." }`.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::persistence;
use crate::skins::{self, DEFAULT_SKIN_ID, Skin};

/// Result of choosing a skin in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Already owned, now active
    Selected,
    /// Newly unlocked and made active
    Unlocked,
    /// Best score below the cost; nothing changed
    Rejected,
}

/// Menu badge for a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinStatus {
    Active,
    Unlocked,
    /// Locked, but the best score already covers the cost
    Affordable,
    Locked,
}

impl SkinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinStatus::Active => "Active",
            SkinStatus::Unlocked => "Unlocked",
            SkinStatus::Affordable => "Affordable",
            SkinStatus::Locked => "Locked",
        }
    }
}

/// On-disk shape of the record
#[derive(Debug, Serialize)]
struct ProgressionDocument {
    unlocked: Vec<String>,
    active: String,
}

/// Unlocked skins plus the active one.
///
/// Invariants: the default skin is always unlocked, and the active skin is
/// always unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionRecord {
    unlocked: HashSet<&'static str>,
    active: &'static str,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            unlocked: HashSet::from([DEFAULT_SKIN_ID]),
            active: DEFAULT_SKIN_ID,
        }
    }
}

impl ProgressionRecord {
    /// Rebuild a record from a stored document, field by field.
    ///
    /// Unknown ids are dropped, the default skin is always added back, and an
    /// active id that is unknown or not unlocked falls back to the default.
    /// Records written under the legacy `achetes`/`actif` keys are accepted.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str, legacy: &str| value.get(key).or_else(|| value.get(legacy));

        let mut unlocked: HashSet<&'static str> = field("unlocked", "achetes")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .filter_map(skins::find)
                    .map(|skin| skin.id)
                    .collect()
            })
            .unwrap_or_default();
        unlocked.insert(DEFAULT_SKIN_ID);

        let active = field("active", "actif")
            .and_then(Value::as_str)
            .and_then(skins::find)
            .map(|skin| skin.id)
            .filter(|id| unlocked.contains(id))
            .unwrap_or(DEFAULT_SKIN_ID);

        Self { unlocked, active }
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn active_id(&self) -> &'static str {
        self.active
    }

    /// The active catalog entry
    pub fn active_skin(&self) -> &'static Skin {
        skins::find(self.active).unwrap_or_else(skins::default_skin)
    }

    /// Unlocked ids ordered by cost, then id
    pub fn unlocked_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.unlocked.iter().copied().collect();
        ids.sort_by_key(|id| (skins::find(id).map_or(0, |skin| skin.cost), *id));
        ids
    }

    /// Owned already, or the best score covers the cost
    pub fn can_unlock(&self, skin: &Skin, best_score: u64) -> bool {
        self.is_unlocked(skin.id) || best_score >= skin.cost
    }

    pub fn status(&self, skin: &Skin, best_score: u64) -> SkinStatus {
        if skin.id == self.active {
            SkinStatus::Active
        } else if self.is_unlocked(skin.id) {
            SkinStatus::Unlocked
        } else if self.can_unlock(skin, best_score) {
            SkinStatus::Affordable
        } else {
            SkinStatus::Locked
        }
    }

    /// Make `skin` active, unlocking it first if the best score allows
    pub fn select(&mut self, skin: &'static Skin, best_score: u64) -> SelectOutcome {
        if self.is_unlocked(skin.id) {
            self.active = skin.id;
            return SelectOutcome::Selected;
        }
        if !self.can_unlock(skin, best_score) {
            return SelectOutcome::Rejected;
        }

        self.unlocked.insert(skin.id);
        self.active = skin.id;
        log::info!("Unlocked skin {} (cost {}, best {})", skin.id, skin.cost, best_score);
        SelectOutcome::Unlocked
    }

    /// `select`, persisting the record whenever it changed
    pub fn select_and_save(
        &mut self,
        skin: &'static Skin,
        best_score: u64,
        path: &Path,
    ) -> SelectOutcome {
        let outcome = self.select(skin, best_score);
        if outcome != SelectOutcome::Rejected {
            self.save(path);
        }
        outcome
    }

    /// Switch to an already unlocked skin. Returns true if the active skin changed.
    pub fn activate(&mut self, skin: &'static Skin) -> bool {
        if !self.is_unlocked(skin.id) || self.active == skin.id {
            return false;
        }
        self.active = skin.id;
        true
    }

    fn to_document(&self) -> ProgressionDocument {
        let mut unlocked = self.unlocked_ids();
        if !unlocked.contains(&DEFAULT_SKIN_ID) {
            unlocked.insert(0, DEFAULT_SKIN_ID);
        }
        let active = if unlocked.contains(&self.active) {
            self.active
        } else {
            DEFAULT_SKIN_ID
        };

        ProgressionDocument {
            unlocked: unlocked.into_iter().map(str::to_string).collect(),
            active: active.to_string(),
        }
    }

    /// Load from disk (default record when missing or invalid)
    pub fn load(path: &Path) -> Self {
        match persistence::read_json(path) {
            Some(value) => {
                let record = Self::from_value(&value);
                log::info!(
                    "Loaded skin progression: {} unlocked, active {}",
                    record.unlocked.len(),
                    record.active
                );
                record
            }
            None => Self::default(),
        }
    }

    /// Write to disk; failures are logged
    pub fn save(&self, path: &Path) {
        persistence::save_or_warn(path, &self.to_document(), "Skin progression");
    }
}
