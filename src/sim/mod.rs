//! Step-based simulation module
//!
//! All gameplay logic lives here. It has no rendering or platform
//! dependencies:
//! - One discrete step per tick
//! - Randomness only through the session's own RNG
//! - Persistence is handled by the caller (`mode`)

pub mod actor;
pub mod bonus;
pub mod food;
pub mod state;
pub mod tick;

pub use actor::{Direction, Snake, StepOutcome};
pub use bonus::{Bonus, BonusKind, BonusTick};
pub use food::{Food, random_free_cell};
pub use state::{GameEvent, GamePhase, GameSession, SessionState};
pub use tick::tick;
