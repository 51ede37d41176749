//! Commanded position tracking.
//!
//! The commanded position is the running sum of every whole-step burst the
//! engine has emitted since the last enable. It is what the axis has been told
//! to do, not a measurement.

use crate::config::units::Steps;

/// Commanded position tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Whole steps from the enable origin
    steps: Steps,
}

impl Position {
    /// Create a tracker at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self { steps: Steps(0) }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Apply one emitted burst.
    #[inline]
    pub fn apply_burst(&mut self, burst: i64) {
        self.steps = self.steps + Steps(burst);
    }

    /// Set the current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = Steps::default();
    }

    /// Signed distance from here to an absolute target.
    #[inline]
    pub fn steps_to(&self, target: Steps) -> i64 {
        (target - self.steps).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bursts_accumulate() {
        let mut pos = Position::new();

        for burst in [3, 5, 7, -2] {
            pos.apply_burst(burst);
        }
        assert_eq!(pos.steps().value(), 13);

        pos.set_origin();
        assert_eq!(pos.steps().value(), 0);
    }

    #[test]
    fn test_steps_to_target() {
        let mut pos = Position::new();
        pos.apply_burst(900);

        assert_eq!(pos.steps_to(Steps(1800)), 900);
        assert_eq!(pos.steps_to(Steps(-100)), -1000);
    }
}
