//! Platform abstraction layer
//!
//! Keeps device details away from the core:
//! - Input events (decoupled from any key binding)
//! - Frame timing
//! - Autopilot input for the attract/demo loop

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::InputEvent;
pub use time::FrameClock;
