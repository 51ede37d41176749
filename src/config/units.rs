//! Unit types for axis quantities.
//!
//! Rates are expressed in encoder/step counts and converted to per-tick
//! fixed-point values by [`crate::config::ScaledLimits`].

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Velocity in counts per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct CountsPerSec(pub u32);

impl CountsPerSec {
    /// Create a new CountsPerSec value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Acceleration in counts per second squared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct CountsPerSecSquared(pub u32);

impl CountsPerSecSquared {
    /// Create a new CountsPerSecSquared value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Frequency of the periodic tick source in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct TickRate(pub u32);

impl TickRate {
    /// 2 kHz baseline tick.
    pub const BASELINE: Self = Self(2000);

    /// Create a new TickRate value.
    #[inline]
    pub const fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the raw value in Hz.
    #[inline]
    pub const fn hz(self) -> u32 {
        self.0
    }

    /// Tick period in seconds.
    #[inline]
    pub fn period_secs(self) -> f32 {
        1.0 / self.0 as f32
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Axis position in whole steps (absolute from the enable origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to CountsPerSec.
    fn counts_per_sec(self) -> CountsPerSec;
    /// Convert to CountsPerSecSquared.
    fn counts_per_sec2(self) -> CountsPerSecSquared;
    /// Convert to TickRate.
    fn hz(self) -> TickRate;
}

impl UnitExt for u32 {
    #[inline]
    fn counts_per_sec(self) -> CountsPerSec {
        CountsPerSec(self)
    }

    #[inline]
    fn counts_per_sec2(self) -> CountsPerSecSquared {
        CountsPerSecSquared(self)
    }

    #[inline]
    fn hz(self) -> TickRate {
        TickRate(self)
    }
}
