//! Autopilot for attract/demo play
//!
//! Produces the same input events a player would. In the menu it buys any
//! skin the best score affords, then starts a run. While playing it heads
//! greedily for the nearest pickup, avoiding walls and its own body.

use glam::IVec2;

use crate::mode::{Mode, ModeController};
use crate::platform::InputEvent;
use crate::progression::SkinStatus;
use crate::sim::{Direction, GameSession};
use crate::skins::SKINS;
use crate::{in_bounds, wrap_cell};

/// Plays a fixed number of runs, then quits
#[derive(Debug, Clone)]
pub struct Autopilot {
    runs: u32,
    runs_started: u32,
}

impl Autopilot {
    pub fn new(runs: u32) -> Self {
        Self {
            runs,
            runs_started: 0,
        }
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    /// Next input for the controller's current mode
    pub fn next_event(&mut self, controller: &ModeController) -> Option<InputEvent> {
        match controller.mode() {
            Mode::Menu => Some(self.menu_event(controller)),
            Mode::Playing => controller
                .session()
                .and_then(steer)
                .map(InputEvent::Direction),
            Mode::GameOver => Some(InputEvent::Start),
        }
    }

    fn menu_event(&mut self, controller: &ModeController) -> InputEvent {
        let best = controller.best_score();
        let affordable = SKINS
            .iter()
            .position(|skin| controller.progression().status(skin, best) == SkinStatus::Affordable);

        if let Some(index) = affordable {
            return if index == controller.cursor() {
                InputEvent::Confirm
            } else {
                InputEvent::Down
            };
        }

        if self.runs_started >= self.runs {
            return InputEvent::Quit;
        }
        self.runs_started += 1;
        log::info!("Autopilot run {}/{}", self.runs_started, self.runs);
        InputEvent::Start
    }
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Cell the head would enter moving `direction`, or None if the move ends the run
fn landing_cell(session: &GameSession, direction: Direction) -> Option<IVec2> {
    let mut next = session.snake.head() + direction.delta();
    if !in_bounds(next) {
        if !session.state.is_invincible() {
            return None;
        }
        next = wrap_cell(next);
    }
    (!session.snake.occupies(next)).then_some(next)
}

/// Open cells around `cell`
fn exits(session: &GameSession, cell: IVec2) -> usize {
    Direction::ALL
        .iter()
        .map(|d| cell + d.delta())
        .filter(|&c| in_bounds(c) && !session.snake.occupies(c))
        .count()
}

/// Pick a steering direction for this tick.
///
/// Targets whichever of the item and the bonus is closer. Moves into dead
/// ends only when nothing else is safe. None when every move is fatal.
pub fn steer(session: &GameSession) -> Option<Direction> {
    let head = session.snake.head();
    let target = match &session.bonus {
        Some(bonus) if manhattan(head, bonus.position) < manhattan(head, session.food.position) => {
            bonus.position
        }
        _ => session.food.position,
    };

    let current = session.snake.direction;
    Direction::ALL
        .iter()
        .copied()
        .filter(|&d| d != current.opposite())
        .filter_map(|d| landing_cell(session, d).map(|cell| (d, cell)))
        .min_by_key(|&(d, cell)| {
            let dead_end = cell != target && exits(session, cell) == 0;
            (dead_end, manhattan(cell, target), d != current)
        })
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
    use crate::persistence::{Storage, test_dir};
    use crate::sim::{Bonus, BonusKind, Snake};
    use crate::skins::default_skin;

    fn session_with(cells: &[IVec2], direction: Direction, food: IVec2) -> GameSession {
        let mut session = GameSession::new(default_skin(), 1);
        session.snake = Snake::with_body(cells.iter().copied(), direction, default_skin());
        session.food.position = food;
        session.bonus = None;
        session
    }

    #[test]
    fn test_heads_for_item() {
        let session = session_with(&[IVec2::new(5, 5)], Direction::Right, IVec2::new(5, 10));
        assert_eq!(steer(&session), Some(Direction::Down));

        let session = session_with(&[IVec2::new(5, 5)], Direction::Right, IVec2::new(9, 5));
        assert_eq!(steer(&session), Some(Direction::Right));
    }

    #[test]
    fn test_never_reverses() {
        let session = session_with(
            &[IVec2::new(5, 5), IVec2::new(4, 5)],
            Direction::Right,
            IVec2::new(0, 5),
        );
        assert_ne!(steer(&session), Some(Direction::Left));
    }

    #[test]
    fn test_avoids_wall() {
        let session = session_with(
            &[IVec2::new(GRID_WIDTH - 1, 5)],
            Direction::Right,
            IVec2::new(GRID_WIDTH - 1, 0),
        );
        assert_eq!(steer(&session), Some(Direction::Up));
    }

    #[test]
    fn test_wraps_when_invincible() {
        let mut session = session_with(
            &[IVec2::new(GRID_WIDTH - 1, 5)],
            Direction::Right,
            IVec2::new(0, 5),
        );
        session.state.invincible_ticks = 10;
        assert_eq!(steer(&session), Some(Direction::Right));
    }

    #[test]
    fn test_boxed_in_has_no_move() {
        // Top-left corner with the body wrapped around the head
        let session = session_with(
            &[IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(1, 1), IVec2::new(0, 1)],
            Direction::Left,
            IVec2::new(10, 10),
        );
        assert_eq!(steer(&session), None);
    }

    #[test]
    fn test_prefers_closer_bonus() {
        let mut session = session_with(
            &[IVec2::new(10, 10)],
            Direction::Right,
            IVec2::new(10, GRID_HEIGHT - 1),
        );
        session.bonus = Some(Bonus::new(BonusKind::Points, IVec2::new(10, 7)));
        assert_eq!(steer(&session), Some(Direction::Up));
    }

    #[test]
    fn test_plays_runs_then_quits() {
        let dir = test_dir("autopilot-runs");
        let mut controller = ModeController::with_seed(Storage::new(&dir), 11);
        let mut autopilot = Autopilot::new(2);
        let mut run_ticks = 0;

        for _ in 0..50_000 {
            if !controller.is_running() {
                break;
            }
            if controller.mode() == Mode::Playing && run_ticks >= 3_000 {
                controller.handle_input(InputEvent::Cancel);
                run_ticks = 0;
            }
            if let Some(event) = autopilot.next_event(&controller) {
                controller.handle_input(event);
            }
            if controller.mode() == Mode::Playing {
                controller.update();
                run_ticks += 1;
            } else {
                run_ticks = 0;
            }
        }

        assert!(!controller.is_running());
        assert_eq!(autopilot.runs_started(), 2);
        assert!(controller.scores().len() <= 2);
    }
}
