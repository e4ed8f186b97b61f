//! Snake Arcade - A grid-based snake arcade game core
//!
//! Core modules:
//! - `sim`: Step-based simulation (actor movement, items, bonuses, session ticks)
//! - `skins`: Immutable cosmetic catalog
//! - `progression`: Skin unlock economy and its persisted record
//! - `highscores`: Persisted score board
//! - `persistence`: JSON document storage helpers
//! - `mode`: Menu / Playing / GameOver state machine
//! - `platform`: Input events, frame pacing and the demo autopilot
//! - `settings`: Runtime configuration

pub mod highscores;
pub mod mode;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod settings;
pub mod sim;
pub mod skins;

pub use highscores::ScoreBoard;
pub use mode::{Mode, ModeController, Snapshot};
pub use progression::{ProgressionRecord, SelectOutcome};
pub use settings::Settings;
pub use skins::{ColorMode, SKINS, Skin, SkinOptions};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in pixels
    pub const CANVAS_WIDTH: i32 = 640;
    pub const CANVAS_HEIGHT: i32 = 480;
    /// Edge length of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;

    /// Grid dimensions in cells
    pub const GRID_WIDTH: i32 = CANVAS_WIDTH / CELL_SIZE;
    pub const GRID_HEIGHT: i32 = CANVAS_HEIGHT / CELL_SIZE;

    /// Steps per second at level 1
    pub const BASE_STEPS_PER_SECOND: u32 = 10;
    /// Hard cap on steps per second (level curve and speed bonus)
    pub const MAX_STEPS_PER_SECOND: u32 = 30;
    /// Steps per second gained per level
    pub const STEPS_PER_LEVEL: u32 = 2;
    /// Steps per second gained from a speed bonus
    pub const SPEED_BONUS_STEPS: u32 = 3;

    /// Growth units granted per item eaten
    pub const GROWTH_PER_ITEM: u32 = 3;
    /// Base score per item (scaled by the multiplier)
    pub const ITEM_SCORE: u64 = 10;
    /// Base score per bonus pickup (scaled by the multiplier)
    pub const BONUS_SCORE: u64 = 5;
    /// A level is gained when the score lands on a multiple of this
    pub const LEVEL_SCORE_STEP: u64 = 50;

    /// Chance of a bonus appearing after an item is eaten
    pub const BONUS_SPAWN_CHANCE: f64 = 0.2;
    /// Bonus lifetime on the board
    pub const BONUS_LIFETIME_TICKS: u32 = 150;
    /// Bonus starts blinking at or below this many remaining ticks
    pub const BONUS_BLINK_THRESHOLD: u32 = 30;
    /// Blink half-period in ticks
    pub const BONUS_BLINK_PERIOD: u32 = 3;

    /// Score multiplier granted by a points bonus, and its duration
    pub const POINTS_MULTIPLIER: u64 = 3;
    pub const POINTS_DURATION_TICKS: u32 = 100;
    /// Invincibility duration
    pub const INVINCIBLE_DURATION_TICKS: u32 = 150;

    /// Number of scores shown on the game over screen
    pub const SCORES_DISPLAYED: usize = 5;
}

use consts::*;

/// Check whether a cell lies on the grid
#[inline]
pub fn in_bounds(cell: IVec2) -> bool {
    cell.x >= 0 && cell.x < GRID_WIDTH && cell.y >= 0 && cell.y < GRID_HEIGHT
}

/// Wrap an off-grid cell to the opposite edge
#[inline]
pub fn wrap_cell(cell: IVec2) -> IVec2 {
    IVec2::new(
        cell.x.rem_euclid(GRID_WIDTH),
        cell.y.rem_euclid(GRID_HEIGHT),
    )
}

/// Top-left pixel corner of a cell
#[inline]
pub fn cell_to_pixel(cell: IVec2) -> Vec2 {
    (cell * CELL_SIZE).as_vec2()
}

/// Pixel center of a cell
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell_to_pixel(cell) + Vec2::splat(CELL_SIZE as f32 / 2.0)
}

/// Cell containing a pixel position (None when off the canvas)
pub fn pixel_to_cell(pos: Vec2) -> Option<IVec2> {
    let cell = (pos / CELL_SIZE as f32).floor().as_ivec2();
    in_bounds(cell).then_some(cell)
}

/// Cell at the middle of the grid (actor spawn point)
#[inline]
pub fn grid_center() -> IVec2 {
    IVec2::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
}

/// Convert a steps-per-second rate into a tick interval in milliseconds
#[inline]
pub fn interval_ms(steps_per_second: u32) -> u64 {
    1000 / u64::from(steps_per_second.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(GRID_WIDTH, 32);
        assert_eq!(GRID_HEIGHT, 24);
        assert_eq!(grid_center(), IVec2::new(16, 12));
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(IVec2::new(0, 0)));
        assert!(in_bounds(IVec2::new(31, 23)));
        assert!(!in_bounds(IVec2::new(-1, 0)));
        assert!(!in_bounds(IVec2::new(32, 0)));
        assert!(!in_bounds(IVec2::new(0, 24)));
    }

    #[test]
    fn test_wrap_cell() {
        assert_eq!(wrap_cell(IVec2::new(-1, 5)), IVec2::new(31, 5));
        assert_eq!(wrap_cell(IVec2::new(32, 5)), IVec2::new(0, 5));
        assert_eq!(wrap_cell(IVec2::new(3, -1)), IVec2::new(3, 23));
        assert_eq!(wrap_cell(IVec2::new(3, 24)), IVec2::new(3, 0));
    }

    #[test]
    fn test_pixel_conversions() {
        let cell = IVec2::new(3, 4);
        assert_eq!(cell_to_pixel(cell), Vec2::new(60.0, 80.0));
        assert_eq!(cell_center(cell), Vec2::new(70.0, 90.0));
        assert_eq!(pixel_to_cell(Vec2::new(79.9, 99.0)), Some(cell));
        assert_eq!(pixel_to_cell(Vec2::new(-1.0, 0.0)), None);
        assert_eq!(pixel_to_cell(Vec2::new(640.0, 0.0)), None);
    }

    #[test]
    fn test_interval_ms() {
        assert_eq!(interval_ms(10), 100);
        assert_eq!(interval_ms(30), 33);
        assert_eq!(interval_ms(0), 1000);
    }
}
