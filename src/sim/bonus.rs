//! Timed bonus pickups
//!
//! A bonus sits on the board for a fixed number of ticks. It ends either by
//! being collected (its effect is applied by the session) or by expiring.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::random_free_cell;
use crate::consts::{BONUS_BLINK_PERIOD, BONUS_BLINK_THRESHOLD, BONUS_LIFETIME_TICKS};

/// Bonus effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Faster tick rate
    Speed,
    /// Temporary score multiplier
    Points,
    /// Temporary wall wrap-around
    Invincible,
}

impl BonusKind {
    pub const ALL: [BonusKind; 3] = [BonusKind::Speed, BonusKind::Points, BonusKind::Invincible];

    /// Pick a kind uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::Speed => "Speed",
            BonusKind::Points => "Points",
            BonusKind::Invincible => "Invincible",
        }
    }

    /// Display color for the presentation layer
    pub fn color(&self) -> [u8; 3] {
        match self {
            BonusKind::Speed => [255, 255, 0],
            BonusKind::Points => [255, 0, 255],
            BonusKind::Invincible => [255, 165, 0],
        }
    }
}

/// Result of advancing a bonus by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusTick {
    Active,
    Expired,
}

/// A live bonus on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    pub kind: BonusKind,
    pub position: IVec2,
    pub remaining_ticks: u32,
}

impl Bonus {
    pub fn new(kind: BonusKind, position: IVec2) -> Self {
        Self {
            kind,
            position,
            remaining_ticks: BONUS_LIFETIME_TICKS,
        }
    }

    /// Place a bonus of the given kind outside `forbidden` (None on a full board)
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        kind: BonusKind,
        forbidden: &HashSet<IVec2>,
    ) -> Option<Self> {
        random_free_cell(rng, forbidden).map(|position| Self::new(kind, position))
    }

    /// Count down one tick
    pub fn tick(&mut self) -> BonusTick {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            BonusTick::Expired
        } else {
            BonusTick::Active
        }
    }

    /// Fraction of lifetime left (1.0 when fresh)
    pub fn remaining_ratio(&self) -> f32 {
        self.remaining_ticks as f32 / BONUS_LIFETIME_TICKS as f32
    }

    /// Rendering hint: the bonus is close to expiring
    pub fn is_expiring(&self) -> bool {
        self.remaining_ticks <= BONUS_BLINK_THRESHOLD
    }

    /// Rendering hint: blink on and off every few ticks while expiring
    pub fn is_visible(&self) -> bool {
        !self.is_expiring() || self.remaining_ticks % (BONUS_BLINK_PERIOD * 2) < BONUS_BLINK_PERIOD
    }
}
