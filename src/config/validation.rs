//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every axis:
/// - Tick rate, velocity and acceleration are non-zero
/// - Travel bounds are valid (min < max)
///
/// The fractional bit width is range-checked when it is deserialized.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, axis) in config.axes.iter() {
        validate_axis(axis)?;
    }

    Ok(())
}

/// Validate a single axis configuration.
pub fn validate_axis(config: &AxisConfig) -> Result<()> {
    if config.tick_rate.hz() == 0 {
        return Err(Error::Config(ConfigError::InvalidTickRate(0)));
    }

    if config.max_velocity.value() == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxVelocity(0)));
    }

    if config.max_acceleration.value() == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration(0)));
    }

    if !config.bounds.is_valid() {
        return Err(Error::Config(ConfigError::InvalidTravelBounds {
            min: config.bounds.min_counts,
            max: config.bounds.max_counts,
        }));
    }

    Ok(())
}
