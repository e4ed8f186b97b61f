//! Top-level mode state machine
//!
//! Menu (browse and unlock skins) -> Playing (one `GameSession`) ->
//! GameOver (scores) -> back to Menu. Quit is accepted in every mode.
//!
//! Persistence happens only here, at two points: the score board when a run
//! ends and the skin record when the active or unlocked skins change.

use std::time::Duration;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::BASE_STEPS_PER_SECOND;
use crate::highscores::{LeaderboardRow, ScoreBoard};
use crate::interval_ms;
use crate::persistence::Storage;
use crate::platform::InputEvent;
use crate::progression::{ProgressionRecord, SelectOutcome, SkinStatus};
use crate::sim::{BonusKind, Direction, GameEvent, GameSession, tick};
use crate::skins::{self, SKINS, Skin};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    GameOver,
}

/// Tone of a menu status line (the renderer picks a color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Unlocked,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusMessage {
    fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One catalog line in the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuRow {
    pub skin: &'static Skin,
    pub status: SkinStatus,
    pub highlighted: bool,
}

/// Bonus as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusView {
    pub kind: BonusKind,
    pub position: IVec2,
    /// Lifetime left, 1.0 when fresh
    pub remaining_ratio: f32,
    /// Blink state
    pub visible: bool,
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: Mode,
    pub skin: &'static Skin,
    pub body: Vec<IVec2>,
    pub direction: Direction,
    pub item: Option<IVec2>,
    pub bonus: Option<BonusView>,
    pub score: u64,
    pub level: u32,
    pub multiplier: u64,
    pub invincible: bool,
    pub best_score: u64,
    pub menu: Vec<MenuRow>,
    pub status: Option<StatusMessage>,
    pub leaderboard: Vec<LeaderboardRow>,
}

/// Owns the persisted records and the current run, and routes input
pub struct ModeController {
    mode: Mode,
    storage: Storage,
    scores: ScoreBoard,
    progression: ProgressionRecord,
    /// Highlighted catalog entry in the menu
    cursor: usize,
    status: Option<StatusMessage>,
    session: Option<GameSession>,
    /// Seeds for new sessions
    seeds: Pcg32,
    running: bool,
}

impl ModeController {
    /// Load records from `storage` and open the menu
    pub fn new(storage: Storage) -> Self {
        Self::with_seed(storage, rand::random())
    }

    /// Like `new`, with reproducible session seeds
    pub fn with_seed(storage: Storage, seed: u64) -> Self {
        let scores = ScoreBoard::load(&storage.scores_path());
        let progression = ProgressionRecord::load(&storage.progression_path());
        let cursor = skins::position_of(progression.active_id());

        log::info!(
            "Data directory {} (best score {}, active skin {})",
            storage.root().display(),
            scores.best(),
            progression.active_id()
        );

        Self {
            mode: Mode::Menu,
            storage,
            scores,
            progression,
            cursor,
            status: None,
            session: None,
            seeds: Pcg32::seed_from_u64(seed),
            running: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn progression(&self) -> &ProgressionRecord {
        &self.progression
    }

    pub fn best_score(&self) -> u64 {
        self.scores.best()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The current (or just finished) run
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Wait between frames in the current mode
    pub fn tick_interval(&self) -> Duration {
        match (&self.session, self.mode) {
            (Some(session), Mode::Playing) => session.state.tick_interval(),
            _ => Duration::from_millis(interval_ms(BASE_STEPS_PER_SECOND)),
        }
    }

    /// Route one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        if event == InputEvent::Quit {
            log::info!("Quit requested");
            self.running = false;
            return;
        }

        match self.mode {
            Mode::Menu => self.handle_menu_input(event),
            Mode::Playing => match event {
                InputEvent::Cancel => {
                    log::info!("Run abandoned");
                    self.return_to_menu();
                }
                _ => {
                    if let (Some(direction), Some(session)) = (event.steering(), &mut self.session) {
                        session.snake.change_direction(direction);
                    }
                }
            },
            Mode::GameOver => {
                if event == InputEvent::Start {
                    self.return_to_menu();
                }
            }
        }
    }

    fn handle_menu_input(&mut self, event: InputEvent) {
        let count = SKINS.len();
        match event {
            InputEvent::Up => {
                self.cursor = (self.cursor + count - 1) % count;
                self.status = None;
            }
            InputEvent::Down => {
                self.cursor = (self.cursor + 1) % count;
                self.status = None;
            }
            InputEvent::Confirm => self.confirm_skin(),
            InputEvent::Start => {
                let skin = &SKINS[self.cursor];
                if !self.progression.is_unlocked(skin.id) {
                    self.status = Some(StatusMessage::new("This skin is locked.", StatusTone::Error));
                    return;
                }
                if self.progression.activate(skin) {
                    self.progression.save(&self.storage.progression_path());
                }
                self.start_session();
            }
            _ => {}
        }
    }

    /// Select or unlock the highlighted skin
    fn confirm_skin(&mut self) {
        let skin = &SKINS[self.cursor];
        let best = self.scores.best();
        let outcome = self
            .progression
            .select_and_save(skin, best, &self.storage.progression_path());

        self.status = Some(match outcome {
            SelectOutcome::Selected => {
                StatusMessage::new(format!("{} selected", skin.name), StatusTone::Success)
            }
            SelectOutcome::Unlocked => {
                StatusMessage::new(format!("{} unlocked!", skin.name), StatusTone::Unlocked)
            }
            SelectOutcome::Rejected => StatusMessage::new(
                "Not enough points to unlock this skin.",
                StatusTone::Error,
            ),
        });
    }

    /// Begin a fresh run with the active skin
    pub fn start_session(&mut self) {
        let seed = self.seeds.random();
        self.session = Some(GameSession::new(self.progression.active_skin(), seed));
        self.status = None;
        self.mode = Mode::Playing;
    }

    /// Leave the current run (or the game over screen) for the menu
    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.cursor = skins::position_of(self.progression.active_id());
        self.status = None;
        self.mode = Mode::Menu;
    }

    /// Advance the simulation one tick while playing
    pub fn update(&mut self) -> Vec<GameEvent> {
        if self.mode != Mode::Playing {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let events = tick(session);
        if session.is_over() {
            self.record_score();
            self.mode = Mode::GameOver;
        }
        events
    }

    /// Write the finished run's score to the board, once per run
    fn record_score(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state.score_recorded {
            return;
        }

        let score = session.state.score;
        let rank = self.scores.record(score);
        self.scores.save(&self.storage.scores_path());
        session.state.score_recorded = true;
        log::info!("Score {} recorded at rank {}", score, rank);
    }

    /// Everything the renderer needs this frame
    pub fn snapshot(&self) -> Snapshot {
        let best = self.scores.best();
        let session = self.session.as_ref();

        let menu = if self.mode == Mode::Menu {
            SKINS
                .iter()
                .enumerate()
                .map(|(i, skin)| MenuRow {
                    skin,
                    status: self.progression.status(skin, best),
                    highlighted: i == self.cursor,
                })
                .collect()
        } else {
            Vec::new()
        };

        let leaderboard = match (self.mode, session) {
            (Mode::GameOver, Some(s)) => self.scores.display_rows(s.state.score),
            _ => Vec::new(),
        };

        Snapshot {
            mode: self.mode,
            skin: session.map_or_else(|| self.progression.active_skin(), |s| s.snake.skin),
            body: session.map(|s| s.snake.body.iter().copied().collect()).unwrap_or_default(),
            direction: session.map_or(Direction::Right, |s| s.snake.direction),
            item: session.map(|s| s.food.position),
            bonus: session.and_then(|s| s.bonus.as_ref()).map(|b| BonusView {
                kind: b.kind,
                position: b.position,
                remaining_ratio: b.remaining_ratio(),
                visible: b.is_visible(),
            }),
            score: session.map_or(0, |s| s.state.score),
            level: session.map_or(1, |s| s.state.level),
            multiplier: session.map_or(1, |s| s.state.score_multiplier),
            invincible: session.is_some_and(|s| s.state.is_invincible()),
            best_score: best,
            menu,
            status: self.status.clone(),
            leaderboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_WIDTH;
    use crate::persistence::test_dir;
    use crate::sim::{GamePhase, Snake};
    use crate::skins::{DEFAULT_SKIN_ID, default_skin};

    fn controller(name: &str) -> ModeController {
        ModeController::with_seed(Storage::new(test_dir(name)), 99)
    }

    /// Put the actor against the right wall so the next tick ends the run
    fn doom(controller: &mut ModeController, score: u64) {
        let session = controller.session_mut().unwrap();
        session.snake = Snake::with_body(
            [IVec2::new(GRID_WIDTH - 1, 2)],
            Direction::Right,
            default_skin(),
        );
        session.bonus = None;
        session.state.score = score;
    }

    #[test]
    fn test_starts_in_menu_with_defaults() {
        let controller = controller("mode-defaults");
        assert_eq!(controller.mode(), Mode::Menu);
        assert!(controller.is_running());
        assert_eq!(controller.cursor(), 0);
        assert!(controller.session().is_none());

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.menu.len(), SKINS.len());
        assert!(snapshot.menu[0].highlighted);
        assert_eq!(snapshot.menu[0].status, SkinStatus::Active);
        assert_eq!(snapshot.menu[2].status, SkinStatus::Locked);
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let mut controller = controller("mode-cursor");
        controller.handle_input(InputEvent::Up);
        assert_eq!(controller.cursor(), SKINS.len() - 1);
        controller.handle_input(InputEvent::Down);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_confirm_reports_outcomes() {
        let mut controller = controller("mode-confirm");

        // Rainbow costs nothing
        controller.handle_input(InputEvent::Down);
        controller.handle_input(InputEvent::Confirm);
        assert_eq!(controller.status().unwrap().tone, StatusTone::Unlocked);
        assert_eq!(controller.progression().active_id(), "rainbow");

        controller.handle_input(InputEvent::Confirm);
        assert_eq!(controller.status().unwrap().tone, StatusTone::Success);

        // Jade forest needs 120
        controller.handle_input(InputEvent::Down);
        assert!(controller.status().is_none());
        controller.handle_input(InputEvent::Confirm);
        assert_eq!(controller.status().unwrap().tone, StatusTone::Error);
        assert!(!controller.progression().is_unlocked("jade_forest"));
        assert_eq!(controller.progression().active_id(), "rainbow");
    }

    #[test]
    fn test_start_on_locked_skin_stays_in_menu() {
        let mut controller = controller("mode-locked-start");
        controller.handle_input(InputEvent::Up); // galaxy
        controller.handle_input(InputEvent::Start);
        assert_eq!(controller.mode(), Mode::Menu);
        assert_eq!(controller.status().unwrap().tone, StatusTone::Error);
    }

    #[test]
    fn test_full_cycle_records_score_once() {
        let mut controller = controller("mode-cycle");
        controller.handle_input(InputEvent::Start);
        assert_eq!(controller.mode(), Mode::Playing);
        assert_eq!(controller.session().unwrap().phase, GamePhase::Playing);

        doom(&mut controller, 130);
        let events = controller.update();
        assert!(events.contains(&GameEvent::GameOver { score: 130 }));
        assert_eq!(controller.mode(), Mode::GameOver);
        assert_eq!(controller.scores().scores(), &[130]);

        // Repeated updates after the run ended do not record again
        controller.update();
        controller.update();
        assert_eq!(controller.scores().len(), 1);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.score, 130);
        assert_eq!(snapshot.leaderboard.len(), 1);
        assert!(snapshot.leaderboard[0].is_current);

        // Persisted
        let reloaded = ScoreBoard::load(&controller.storage.scores_path());
        assert_eq!(reloaded.scores(), &[130]);

        controller.handle_input(InputEvent::Start);
        assert_eq!(controller.mode(), Mode::Menu);
        assert!(controller.session().is_none());
        assert_eq!(controller.best_score(), 130);
    }

    #[test]
    fn test_unlock_after_earning_score() {
        let dir = test_dir("mode-unlock");
        let mut controller = ModeController::with_seed(Storage::new(&dir), 5);
        controller.handle_input(InputEvent::Start);
        doom(&mut controller, 200);
        controller.update();
        controller.handle_input(InputEvent::Start);

        // Move to jade forest (index 2) and buy it
        controller.handle_input(InputEvent::Down);
        controller.handle_input(InputEvent::Down);
        controller.handle_input(InputEvent::Confirm);
        assert_eq!(controller.status().unwrap().tone, StatusTone::Unlocked);

        // The record survives a restart and the cursor follows the active skin
        let reloaded = ModeController::with_seed(Storage::new(&dir), 5);
        assert_eq!(reloaded.progression().active_id(), "jade_forest");
        assert_eq!(reloaded.cursor(), 2);
        assert_eq!(reloaded.best_score(), 200);
    }

    #[test]
    fn test_game_over_returns_cursor_to_active_skin() {
        let mut controller = controller("mode-cursor-restore");
        controller.handle_input(InputEvent::Start);
        doom(&mut controller, 0);
        controller.update();
        assert_eq!(controller.mode(), Mode::GameOver);

        controller.handle_input(InputEvent::Confirm); // not a continue signal
        assert_eq!(controller.mode(), Mode::GameOver);
        controller.handle_input(InputEvent::Start);
        assert_eq!(controller.mode(), Mode::Menu);
        assert_eq!(controller.cursor(), skins::position_of(DEFAULT_SKIN_ID));
    }

    #[test]
    fn test_start_uses_highlighted_unlocked_skin() {
        let mut controller = controller("mode-start-skin");
        controller.handle_input(InputEvent::Down);
        controller.handle_input(InputEvent::Confirm); // unlock rainbow
        controller.handle_input(InputEvent::Up);
        controller.handle_input(InputEvent::Start); // start with orange

        assert_eq!(controller.progression().active_id(), DEFAULT_SKIN_ID);
        assert_eq!(controller.session().unwrap().snake.skin.id, DEFAULT_SKIN_ID);
        assert_eq!(controller.snapshot().skin.id, DEFAULT_SKIN_ID);
    }

    #[test]
    fn test_playing_forwards_steering_and_cancel() {
        let mut controller = controller("mode-steer");
        controller.handle_input(InputEvent::Start);
        controller.handle_input(InputEvent::Up);
        assert_eq!(controller.session().unwrap().snake.heading(), Direction::Up);
        controller.handle_input(InputEvent::Direction(Direction::Left));
        assert_eq!(controller.session().unwrap().snake.heading(), Direction::Up);

        controller.update();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.mode, Mode::Playing);
        assert_eq!(snapshot.direction, Direction::Up);
        assert!(snapshot.item.is_some());

        controller.handle_input(InputEvent::Cancel);
        assert_eq!(controller.mode(), Mode::Menu);
        assert!(controller.scores().is_empty());
    }

    #[test]
    fn test_quit_from_any_mode() {
        for setup in [Mode::Menu, Mode::Playing, Mode::GameOver] {
            let mut controller = controller("mode-quit");
            if setup != Mode::Menu {
                controller.handle_input(InputEvent::Start);
            }
            if setup == Mode::GameOver {
                doom(&mut controller, 0);
                controller.update();
            }
            assert_eq!(controller.mode(), setup);

            controller.handle_input(InputEvent::Quit);
            assert!(!controller.is_running());
        }
    }

    #[test]
    fn test_tick_interval_follows_session_speed() {
        let mut controller = controller("mode-interval");
        assert_eq!(controller.tick_interval(), Duration::from_millis(100));
        controller.handle_input(InputEvent::Start);
        controller.session_mut().unwrap().state.steps_per_second = 20;
        assert_eq!(controller.tick_interval(), Duration::from_millis(50));
    }
}
