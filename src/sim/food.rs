//! Collectible item placement

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::in_bounds;

/// Draw a uniformly random grid cell outside `forbidden`.
///
/// Returns None when every cell is forbidden.
pub fn random_free_cell<R: Rng + ?Sized>(rng: &mut R, forbidden: &HashSet<IVec2>) -> Option<IVec2> {
    let blocked = forbidden.iter().filter(|cell| in_bounds(**cell)).count();
    if blocked >= (GRID_WIDTH * GRID_HEIGHT) as usize {
        return None;
    }

    loop {
        let cell = IVec2::new(rng.random_range(0..GRID_WIDTH), rng.random_range(0..GRID_HEIGHT));
        if !forbidden.contains(&cell) {
            return Some(cell);
        }
    }
}

/// The single active item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: IVec2,
}

impl Food {
    /// Place a new item outside `forbidden`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, forbidden: &HashSet<IVec2>) -> Self {
        let mut food = Self {
            position: IVec2::ZERO,
        };
        food.respawn(rng, forbidden);
        food
    }

    /// Move the item to a fresh cell outside `forbidden`.
    ///
    /// On a full board the item stays where it is.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, forbidden: &HashSet<IVec2>) {
        match random_free_cell(rng, forbidden) {
            Some(cell) => self.position = cell,
            None => log::debug!("No free cell for item, keeping {}", self.position),
        }
    }
}
