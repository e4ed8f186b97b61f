//! The player-controlled actor (the snake)
//!
//! Body cells are stored head first. Growth is deferred: each feeding adds
//! to `pending_growth`, and every successful step with growth pending keeps
//! the tail instead of dropping it.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::GROWTH_PER_ITEM;
use crate::skins::Skin;
use crate::{grid_center, in_bounds, wrap_cell};

/// Heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit cell offset (screen coordinates, y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Result of a single movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    BlockedByWall,
    BlockedBySelf,
}

/// The actor: an ordered chain of cells, head first
#[derive(Debug, Clone)]
pub struct Snake {
    /// Occupied cells, head at index 0
    pub body: VecDeque<IVec2>,
    /// Direction applied by the last step
    pub direction: Direction,
    /// Future steps that keep the tail
    pub pending_growth: u32,
    /// Cosmetic skin (catalog entry, read by the renderer)
    pub skin: &'static Skin,
    /// Direction requested since the last step
    queued: Option<Direction>,
}

impl Snake {
    /// A one-cell actor at the grid center heading right
    pub fn new(skin: &'static Skin) -> Self {
        Self::with_body([grid_center()], Direction::Right, skin)
    }

    /// Build an actor from explicit cells (head first)
    pub fn with_body(
        cells: impl IntoIterator<Item = IVec2>,
        direction: Direction,
        skin: &'static Skin,
    ) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
            pending_growth: 0,
            skin,
            queued: None,
        }
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or_else(grid_center)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any body cell occupies `cell`
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }

    /// Direction the next step will use
    pub fn heading(&self) -> Direction {
        self.queued.unwrap_or(self.direction)
    }

    /// Request a new heading for the next step.
    ///
    /// Reversing onto the neck is ignored. Later requests in the same tick
    /// replace earlier ones.
    pub fn change_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.queued = Some(direction);
    }

    /// Grant growth for one eaten item (stacks with any growth still pending)
    pub fn mark_fed(&mut self) {
        self.pending_growth += GROWTH_PER_ITEM;
    }

    /// Advance one cell. Walls and the body block the move.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(direction) = self.queued.take() {
            self.direction = direction;
        }

        let new_head = self.head() + self.direction.delta();
        if !in_bounds(new_head) {
            return StepOutcome::BlockedByWall;
        }
        if self.occupies(new_head) {
            return StepOutcome::BlockedBySelf;
        }

        self.advance_to(new_head);
        StepOutcome::Moved
    }

    /// Advance one cell, wrapping through the wall to the opposite edge.
    ///
    /// Used after `step` reported a wall while invincible; the wrapped cell
    /// is still checked against the body.
    pub fn step_wrapped(&mut self) -> StepOutcome {
        let new_head = wrap_cell(self.head() + self.direction.delta());
        if self.occupies(new_head) {
            return StepOutcome::BlockedBySelf;
        }

        self.advance_to(new_head);
        StepOutcome::Moved
    }

    fn advance_to(&mut self, new_head: IVec2) {
        self.body.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
    }
}
