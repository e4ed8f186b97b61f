//! Per-tick session update
//!
//! Order within a tick is fixed: timed effects count down, the actor moves,
//! the item is checked, then the bonus is aged or collected.

use rand::Rng;

use super::actor::StepOutcome;
use super::bonus::{Bonus, BonusKind, BonusTick};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::BONUS_SPAWN_CHANCE;

/// Advance the session by one tick, returning what happened
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick once the run is over
    if session.phase == GamePhase::GameOver {
        return events;
    }

    session.state.tick_count += 1;
    session.state.tick_timers();

    // Movement; invincibility turns a wall hit into a wrap, never a body hit
    let moved = match session.snake.step() {
        StepOutcome::Moved => true,
        StepOutcome::BlockedByWall if session.state.is_invincible() => {
            match session.snake.step_wrapped() {
                StepOutcome::Moved => {
                    events.push(GameEvent::Wrapped);
                    true
                }
                _ => false,
            }
        }
        StepOutcome::BlockedByWall | StepOutcome::BlockedBySelf => false,
    };
    if !moved {
        end_session(session, &mut events);
        return events;
    }

    let head = session.snake.head();

    if head == session.food.position {
        eat_item(session, &mut events);
    }

    if let Some(bonus) = session.bonus.as_mut() {
        let kind = bonus.kind;
        if bonus.tick() == BonusTick::Expired {
            log::debug!("{} bonus expired", kind.as_str());
            session.bonus = None;
            events.push(GameEvent::BonusExpired { kind });
        } else if head == bonus.position {
            session.bonus = None;
            let points = session.state.apply_bonus(kind);
            log::debug!("{} bonus collected (+{})", kind.as_str(), points);
            events.push(GameEvent::BonusCollected { kind, points });
        }
    }

    events
}

fn eat_item(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    session.snake.mark_fed();

    let (points, level_up) = session.state.award_item();
    events.push(GameEvent::ItemEaten { points });
    if let Some(level) = level_up {
        log::debug!("Level {} reached at score {}", level, session.state.score);
        events.push(GameEvent::LevelUp { level });
    }

    let forbidden = session.item_forbidden_cells();
    session.food.respawn(&mut session.rng, &forbidden);

    let roll = session.rng.random_bool(BONUS_SPAWN_CHANCE);
    if roll && session.bonus.is_none() {
        let kind = BonusKind::random(&mut session.rng);
        let forbidden = session.bonus_forbidden_cells();
        session.bonus = Bonus::spawn(&mut session.rng, kind, &forbidden);
        if let Some(bonus) = &session.bonus {
            log::debug!("{} bonus spawned at {}", kind.as_str(), bonus.position);
            events.push(GameEvent::BonusSpawned { kind });
        }
    }
}

fn end_session(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    session.phase = GamePhase::GameOver;
    log::info!(
        "Game over: score {} (level {}, length {}, {} ticks)",
        session.state.score,
        session.state.level,
        session.snake.len(),
        session.state.tick_count
    );
    events.push(GameEvent::GameOver {
        score: session.state.score,
    });
}
