//! Session state and core simulation types
//!
//! A `GameSession` is built fresh for every run and thrown away at the end;
//! there is no in-place reset.

use std::collections::HashSet;
use std::time::Duration;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Snake;
use super::bonus::{Bonus, BonusKind};
use super::food::Food;
use crate::consts::*;
use crate::interval_ms;
use crate::skins::Skin;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Notable things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ItemEaten { points: u64 },
    LevelUp { level: u32 },
    BonusSpawned { kind: BonusKind },
    BonusCollected { kind: BonusKind, points: u64 },
    BonusExpired { kind: BonusKind },
    /// Head wrapped through a wall while invincible
    Wrapped,
    GameOver { score: u64 },
}

/// Score, level and timed modifiers of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score: u64,
    pub level: u32,
    pub score_multiplier: u64,
    /// Steps per second; the tick interval is derived from it
    pub steps_per_second: u32,
    pub invincible_ticks: u32,
    pub multiplier_ticks: u32,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Set once the final score has been written to the score board
    pub score_recorded: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            score_multiplier: 1,
            steps_per_second: BASE_STEPS_PER_SECOND,
            invincible_ticks: 0,
            multiplier_ticks: 0,
            tick_count: 0,
            score_recorded: false,
        }
    }
}

impl SessionState {
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Wait between two ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(interval_ms(self.steps_per_second))
    }

    /// Count down timed effects, clearing them when they run out
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);

        if self.multiplier_ticks > 0 {
            self.multiplier_ticks -= 1;
            if self.multiplier_ticks == 0 {
                self.score_multiplier = 1;
            }
        }
    }

    /// Add points for an eaten item.
    ///
    /// A level is gained only when the new score lands exactly on a multiple
    /// of `LEVEL_SCORE_STEP`; jumping over one (possible with the multiplier)
    /// does not count. Returns the new level on a level up.
    pub fn award_item(&mut self) -> (u64, Option<u32>) {
        let points = ITEM_SCORE * self.score_multiplier;
        self.score += points;

        if self.score % LEVEL_SCORE_STEP != 0 {
            return (points, None);
        }
        self.level += 1;
        self.steps_per_second =
            (BASE_STEPS_PER_SECOND + self.level * STEPS_PER_LEVEL).min(MAX_STEPS_PER_SECOND);
        (points, Some(self.level))
    }

    /// Apply a collected bonus, returning the points it granted
    pub fn apply_bonus(&mut self, kind: BonusKind) -> u64 {
        match kind {
            BonusKind::Speed => {
                self.steps_per_second =
                    (self.steps_per_second + SPEED_BONUS_STEPS).min(MAX_STEPS_PER_SECOND);
            }
            BonusKind::Points => {
                self.score_multiplier = POINTS_MULTIPLIER;
                self.multiplier_ticks = POINTS_DURATION_TICKS;
            }
            BonusKind::Invincible => {
                self.invincible_ticks = INVINCIBLE_DURATION_TICKS;
            }
        }

        let points = BONUS_SCORE * self.score_multiplier;
        self.score += points;
        points
    }
}

/// One run: actor, item, optional bonus and the score state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Food,
    pub bonus: Option<Bonus>,
    pub state: SessionState,
    pub phase: GamePhase,
    /// Run seed (logged for bug reports)
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Start a run with the given skin and RNG seed
    pub fn new(skin: &'static Skin, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::new(skin);
        let food = Food::spawn(&mut rng, &snake.body.iter().copied().collect());

        log::info!("New session (skin {}, seed {})", skin.id, seed);

        Self {
            snake,
            food,
            bonus: None,
            state: SessionState::default(),
            phase: GamePhase::Playing,
            seed,
            rng,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Cells an item may not spawn on: the body plus any live bonus
    pub fn item_forbidden_cells(&self) -> HashSet<IVec2> {
        let mut cells: HashSet<IVec2> = self.snake.body.iter().copied().collect();
        if let Some(bonus) = &self.bonus {
            cells.insert(bonus.position);
        }
        cells
    }

    /// Cells a bonus may not spawn on: the body plus the item
    pub fn bonus_forbidden_cells(&self) -> HashSet<IVec2> {
        let mut cells: HashSet<IVec2> = self.snake.body.iter().copied().collect();
        cells.insert(self.food.position);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::default_skin;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(default_skin(), 42);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.state, SessionState::default());
        assert_eq!(session.state.level, 1);
        assert_eq!(session.state.tick_interval(), Duration::from_millis(100));
        assert!(session.bonus.is_none());
        assert!(!session.snake.occupies(session.food.position));
    }

    #[test]
    fn test_multiplier_reverts_when_timer_runs_out() {
        let mut state = SessionState::default();
        state.apply_bonus(BonusKind::Points);
        for _ in 1..POINTS_DURATION_TICKS {
            state.tick_timers();
            assert_eq!(state.score_multiplier, POINTS_MULTIPLIER);
        }
        state.tick_timers();
        assert_eq!(state.score_multiplier, 1);
        assert_eq!(state.multiplier_ticks, 0);
    }

    #[test]
    fn test_invincibility_wears_off() {
        let mut state = SessionState::default();
        state.apply_bonus(BonusKind::Invincible);
        assert!(state.is_invincible());
        for _ in 0..INVINCIBLE_DURATION_TICKS {
            state.tick_timers();
        }
        assert!(!state.is_invincible());
    }

    #[test]
    fn test_speed_bonus_is_capped() {
        let mut state = SessionState::default();
        assert_eq!(state.apply_bonus(BonusKind::Speed), BONUS_SCORE);
        assert_eq!(state.steps_per_second, BASE_STEPS_PER_SECOND + SPEED_BONUS_STEPS);

        state.steps_per_second = MAX_STEPS_PER_SECOND - 1;
        state.apply_bonus(BonusKind::Speed);
        assert_eq!(state.steps_per_second, MAX_STEPS_PER_SECOND);
        assert!(state.tick_interval() >= Duration::from_millis(interval_ms(MAX_STEPS_PER_SECOND)));
    }

    #[test]
    fn test_points_bonus_pays_with_new_multiplier() {
        let mut state = SessionState::default();
        assert_eq!(state.apply_bonus(BonusKind::Points), 15);
        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_level_up_on_exact_multiple() {
        let mut state = SessionState::default();
        state.score = 40;
        assert_eq!(state.award_item(), (10, Some(2)));
        assert_eq!(state.steps_per_second, 14);
    }

    #[test]
    fn test_level_check_skips_multiples_jumped_over() {
        // 40 -> 70 under the x3 multiplier passes 50 without landing on it
        let mut state = SessionState::default();
        state.score = 40;
        state.score_multiplier = 3;
        assert_eq!(state.award_item(), (30, None));
        assert_eq!(state.score, 70);
        assert_eq!(state.level, 1);

        // 20 -> 50 lands on it
        state.score = 20;
        assert_eq!(state.award_item(), (30, Some(2)));
    }

    #[test]
    fn test_level_speed_is_capped() {
        let mut state = SessionState::default();
        state.level = 20;
        state.score = 990;
        state.award_item();
        assert_eq!(state.level, 21);
        assert_eq!(state.steps_per_second, MAX_STEPS_PER_SECOND);
    }

    #[test]
    fn test_forbidden_cells() {
        let mut session = GameSession::new(default_skin(), 1);
        session.food.position = IVec2::new(0, 0);
        session.bonus = Some(Bonus::new(BonusKind::Speed, IVec2::new(1, 1)));

        let items = session.item_forbidden_cells();
        assert!(items.contains(&session.snake.head()));
        assert!(items.contains(&IVec2::new(1, 1)));
        assert!(!items.contains(&IVec2::new(0, 0)));

        let bonuses = session.bonus_forbidden_cells();
        assert!(bonuses.contains(&session.snake.head()));
        assert!(bonuses.contains(&IVec2::new(0, 0)));
    }
}
