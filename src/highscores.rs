//! High score board
//!
//! Every finished run is kept (storage grows without bound); only the top
//! few are shown on the game over screen.

use std::path::Path;

use serde_json::Value;

use crate::consts::SCORES_DISPLAYED;
use crate::persistence;

/// One line of the game over leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// "1.", "2.", ... or "You" for an unranked current score
    pub label: String,
    pub score: u64,
    /// Highlights the score of the run that just ended
    pub is_current: bool,
}

/// Scores of past runs, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: Vec<u64>,
}

impl ScoreBoard {
    /// Create empty board
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build from arbitrary scores (sorted descending)
    pub fn from_scores(scores: impl IntoIterator<Item = u64>) -> Self {
        let mut scores: Vec<u64> = scores.into_iter().collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self { scores }
    }

    /// Parse a stored document leniently.
    ///
    /// Anything but an array yields an empty board. Entries that are not
    /// integers (or integral numbers/strings) are dropped, and negative
    /// scores count as 0.
    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_array() else {
            log::warn!("Score document is not an array, starting fresh");
            return Self::new();
        };

        let scores: Vec<u64> = entries.iter().filter_map(parse_score).collect();
        if scores.len() != entries.len() {
            log::warn!(
                "Discarded {} invalid score entries",
                entries.len() - scores.len()
            );
        }
        Self::from_scores(scores)
    }

    /// Check if the board is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// All scores, best first
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Best score ever (0 when empty)
    pub fn best(&self) -> u64 {
        self.scores.first().copied().unwrap_or(0)
    }

    /// Top `n` scores
    pub fn top(&self, n: usize) -> &[u64] {
        &self.scores[..n.min(self.scores.len())]
    }

    /// Get the rank a score would achieve (1-indexed)
    pub fn potential_rank(&self, score: u64) -> usize {
        self.scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len())
            + 1
    }

    /// Add a finished run's score, returning its rank (1-indexed)
    pub fn record(&mut self, score: u64) -> usize {
        let rank = self.potential_rank(score);
        self.scores.insert(rank - 1, score);
        rank
    }

    /// Leaderboard lines for the game over screen.
    ///
    /// Shows the top entries and marks the first one equal to `current`.
    /// When the current score did not make the top list it gets its own
    /// "You" line at the bottom.
    pub fn display_rows(&self, current: u64) -> Vec<LeaderboardRow> {
        let mut marked = false;
        let mut rows: Vec<LeaderboardRow> = self
            .top(SCORES_DISPLAYED)
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let is_current = !marked && score == current;
                marked |= is_current;
                LeaderboardRow {
                    label: format!("{}.", i + 1),
                    score,
                    is_current,
                }
            })
            .collect();

        if !marked {
            rows.push(LeaderboardRow {
                label: "You".to_string(),
                score: current,
                is_current: true,
            });
        }
        rows
    }

    /// Load from disk (empty board when missing or invalid)
    pub fn load(path: &Path) -> Self {
        match persistence::read_json(path) {
            Some(value) => {
                let board = Self::from_value(&value);
                log::info!("Loaded {} scores", board.len());
                board
            }
            None => Self::new(),
        }
    }

    /// Write to disk in descending order; failures are logged
    pub fn save(&self, path: &Path) {
        let mut sorted = self.scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        persistence::save_or_warn(path, &sorted, "Scores");
    }
}

/// Integral entries are kept; negative ones clamp to 0
fn parse_score(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f.max(0.0) as u64)
            }),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<i64>().ok().map(|_| 0))
        }
        _ => None,
    }
}
