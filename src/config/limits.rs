//! Soft travel bounds.

use serde::Deserialize;

/// Soft travel bounds in counts, relative to the enable origin.
///
/// Consulted only by the distance-bounded stop: a requested stopping distance
/// that would cross a bound is shortened to the remaining room. Ordinary moves
/// are never checked against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelBounds {
    /// Lowest allowed commanded position.
    #[serde(default = "default_min")]
    pub min_counts: i64,

    /// Highest allowed commanded position.
    #[serde(default = "default_max")]
    pub max_counts: i64,
}

fn default_min() -> i64 {
    i64::MIN
}

fn default_max() -> i64 {
    i64::MAX
}

impl TravelBounds {
    /// No bounds in either direction.
    pub const UNBOUNDED: Self = Self {
        min_counts: i64::MIN,
        max_counts: i64::MAX,
    };

    /// Create new travel bounds.
    pub const fn new(min_counts: i64, max_counts: i64) -> Self {
        Self {
            min_counts,
            max_counts,
        }
    }

    /// Check if bounds are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min_counts < self.max_counts
    }

    /// Check if a position is within bounds.
    pub fn contains(&self, position: i64) -> bool {
        position >= self.min_counts && position <= self.max_counts
    }

    /// Counts left between `position` and the bound ahead of it.
    ///
    /// Zero when `position` is already on or past that bound.
    pub fn room(&self, position: i64, forward: bool) -> u64 {
        let room = if forward {
            self.max_counts as i128 - position as i128
        } else {
            position as i128 - self.min_counts as i128
        };
        room.clamp(0, u64::MAX as i128) as u64
    }
}

impl Default for TravelBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
