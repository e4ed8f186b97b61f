//! Frame timing for the driver loop

use std::time::{Duration, Instant};

/// Tracks when the last frame started so the loop can sleep only for the
/// part of the tick interval that is left.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_start: Instant,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time left in the current frame for a target frame length
    pub fn remaining(&self, frame_length: Duration) -> Duration {
        frame_length.saturating_sub(self.frame_start.elapsed())
    }

    /// Sleep out the rest of the frame and start the next one
    pub fn wait(&mut self, frame_length: Duration) {
        let remaining = self.remaining(frame_length);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frame_does_not_sleep() {
        let mut clock = FrameClock::new();
        clock.wait(Duration::ZERO);
        clock.wait(Duration::ZERO);
        assert_eq!(clock.frames(), 2);
        assert_eq!(clock.remaining(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.wait(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(clock.remaining(Duration::from_secs(60)) > Duration::from_secs(59));
    }
}
