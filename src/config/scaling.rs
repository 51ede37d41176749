//! Per-tick fixed-point limits derived from axis configuration.

use super::axis::AxisConfig;
use super::units::{CountsPerSec, CountsPerSecSquared, TickRate};
use crate::motion::QFormat;

/// Velocity and acceleration ceilings in Q units per tick.
///
/// Computed once per configuration change and consulted on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledLimits {
    /// Velocity ceiling, Q units per tick.
    pub velocity_q: i64,
    /// Acceleration ceiling, Q units per tick².
    pub acceleration_q: i64,
}

impl ScaledLimits {
    /// Scale counts/sec and counts/sec² into Q units per tick.
    ///
    /// Out-of-range inputs saturate rather than fail; see
    /// [`QFormat::velocity_per_tick`] and [`QFormat::acceleration_per_tick`].
    pub fn scale(
        velocity: CountsPerSec,
        acceleration: CountsPerSecSquared,
        tick: TickRate,
        q: QFormat,
    ) -> Self {
        Self {
            velocity_q: q.velocity_per_tick(velocity, tick),
            acceleration_q: q.acceleration_per_tick(acceleration, tick),
        }
    }

    /// Compute limits from axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        Self::scale(
            config.max_velocity,
            config.max_acceleration,
            config.tick_rate,
            config.fractional_bits,
        )
    }

    /// Effective velocity ceiling in counts/sec after saturation.
    pub fn velocity_counts_per_sec(&self, tick: TickRate, q: QFormat) -> f32 {
        q.velocity_to_counts(self.velocity_q, tick)
    }
}
