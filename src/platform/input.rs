//! Discrete input events consumed by the mode controller

use crate::sim::Direction;

/// One input event. Device bindings map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Steer the actor (Playing)
    Direction(Direction),
    /// Move the menu cursor up
    Up,
    /// Move the menu cursor down
    Down,
    /// Select / unlock the highlighted skin
    Confirm,
    /// Start a run (Menu) or continue (GameOver)
    Start,
    /// Abandon the current run
    Cancel,
    /// Leave the game from any mode
    Quit,
}

impl InputEvent {
    /// Map a key name to an event, the way a keyboard binding would
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "up" | "w" => Some(InputEvent::Up),
            "down" | "s" => Some(InputEvent::Down),
            "left" | "a" => Some(InputEvent::Direction(Direction::Left)),
            "right" | "d" => Some(InputEvent::Direction(Direction::Right)),
            "enter" | "return" => Some(InputEvent::Confirm),
            "space" => Some(InputEvent::Start),
            "escape" | "esc" => Some(InputEvent::Cancel),
            "q" | "quit" => Some(InputEvent::Quit),
            _ => None,
        }
    }

    /// Steering direction carried by this event, if any.
    ///
    /// Up/Down double as steering while playing.
    pub fn steering(&self) -> Option<Direction> {
        match self {
            InputEvent::Direction(d) => Some(*d),
            InputEvent::Up => Some(Direction::Up),
            InputEvent::Down => Some(Direction::Down),
            _ => None,
        }
    }
}
