//! Fixed-point (Q-format) helpers.
//!
//! All kinematic state is kept in signed 64-bit integers whose low `bits` bits
//! are fractional steps. Rates given in counts/sec are converted to per-tick
//! quantities by dividing by the tick frequency once for velocity and twice
//! for acceleration.

use serde::Deserialize;

use crate::config::units::{CountsPerSec, CountsPerSecSquared, TickRate};
use crate::error::ConfigError;

/// Velocity ceiling in whole steps per tick.
pub const MAX_STEPS_PER_TICK: i64 = 50;

/// Fractional bit width of the fixed-point representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QFormat(u8);

impl QFormat {
    /// Default width: 10 fractional bits (1/1024 step resolution).
    pub const DEFAULT: Self = Self(10);

    /// Smallest supported width.
    pub const MIN_BITS: u8 = 1;

    /// Largest supported width. Keeps `velocity²` well inside i64.
    pub const MAX_BITS: u8 = 16;

    /// Create a new QFormat with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFractionalBits` outside `1..=16`.
    pub fn new(bits: u8) -> Result<Self, ConfigError> {
        if (Self::MIN_BITS..=Self::MAX_BITS).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(ConfigError::InvalidFractionalBits(bits))
        }
    }

    /// Number of fractional bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// One whole step in Q units.
    #[inline]
    pub const fn one(self) -> i64 {
        1 << self.0
    }

    /// Whole steps to Q units.
    #[inline]
    pub const fn from_steps(self, steps: i64) -> i64 {
        steps << self.0
    }

    /// Q units to whole steps, truncating toward zero.
    ///
    /// Truncation (rather than an arithmetic shift, which floors) keeps
    /// reverse moves quantized the same way as forward ones.
    #[inline]
    pub const fn whole_steps(self, q: i64) -> i64 {
        q / self.one()
    }

    /// Velocity ceiling in Q units per tick.
    #[inline]
    pub const fn max_velocity(self) -> i64 {
        self.from_steps(MAX_STEPS_PER_TICK)
    }

    /// Acceleration ceiling in Q units per tick²: half a step per tick².
    #[inline]
    pub const fn max_acceleration(self) -> i64 {
        self.one() >> 1
    }

    /// Convert counts/sec into Q units per tick.
    ///
    /// Saturates at [`Self::max_velocity`] and never returns less than one
    /// Q unit.
    pub fn velocity_per_tick(self, velocity: CountsPerSec, tick: TickRate) -> i64 {
        let hz = tick.hz().max(1) as i64;
        let scaled = ((velocity.value() as i64) << self.0) / hz;
        scaled.clamp(1, self.max_velocity())
    }

    /// Convert counts/sec² into Q units per tick².
    ///
    /// Saturates at [`Self::max_acceleration`] and never returns less than one
    /// Q unit.
    pub fn acceleration_per_tick(self, acceleration: CountsPerSecSquared, tick: TickRate) -> i64 {
        let hz = tick.hz().max(1) as i128;
        let scaled = ((acceleration.value() as i128) << self.0) / (hz * hz);
        (scaled as i64).clamp(1, self.max_acceleration())
    }

    /// Q units per tick back to counts/sec.
    pub fn velocity_to_counts(self, velocity_q: i64, tick: TickRate) -> f32 {
        velocity_q as f32 * tick.hz() as f32 / self.one() as f32
    }
}

impl Default for QFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for QFormat {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for QFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        QFormat::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
