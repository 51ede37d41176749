//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::TravelBounds;
use super::units::{CountsPerSec, CountsPerSecSquared, TickRate};
use crate::motion::QFormat;

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Velocity ceiling in counts per second.
    #[serde(rename = "max_velocity_counts_per_sec")]
    pub max_velocity: CountsPerSec,

    /// Acceleration ceiling in counts per second squared.
    #[serde(rename = "max_acceleration_counts_per_sec2")]
    pub max_acceleration: CountsPerSecSquared,

    /// Frequency at which the tick advance is called.
    #[serde(default, rename = "tick_rate_hz")]
    pub tick_rate: TickRate,

    /// Fixed-point fractional bit width.
    #[serde(default)]
    pub fractional_bits: QFormat,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// DIR settle time before the first step of a move.
    #[serde(default = "default_direction_setup_us")]
    pub direction_setup_us: u32,

    /// STEP high and low width.
    #[serde(default = "default_step_pulse_ns")]
    pub step_pulse_ns: u32,

    /// Soft travel bounds for the distance-bounded stop.
    #[serde(default)]
    pub bounds: TravelBounds,
}

fn default_direction_setup_us() -> u32 {
    1000
}

fn default_step_pulse_ns() -> u32 {
    2000
}

impl AxisConfig {
    /// Create a config with default timing, Q-format and bounds.
    pub fn new(name: &str, max_velocity: CountsPerSec, max_acceleration: CountsPerSecSquared) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            max_velocity,
            max_acceleration,
            tick_rate: TickRate::default(),
            fractional_bits: QFormat::default(),
            invert_direction: false,
            direction_setup_us: default_direction_setup_us(),
            step_pulse_ns: default_step_pulse_ns(),
            bounds: TravelBounds::default(),
        }
    }

    /// Set travel bounds.
    pub fn with_bounds(mut self, bounds: TravelBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the tick rate.
    pub fn with_tick_rate(mut self, tick_rate: TickRate) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set the fractional bit width.
    pub fn with_fractional_bits(mut self, q: QFormat) -> Self {
        self.fractional_bits = q;
        self
    }
}
