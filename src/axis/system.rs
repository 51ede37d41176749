//! Axis system facade for multi-axis configuration.
//!
//! Builds engines and drivers by name from one configuration. Axes are
//! independent; ticking them together is the caller's scheduler's job.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::String;

use crate::config::{AxisConfig, ScaledLimits, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{MotionEngine, MoveEstimate};

use super::builder::AxisDriverBuilder;
use super::driver::AxisDriver;
use super::state::Disabled;

/// A facade for building axes from named configurations.
///
/// # Example
///
/// ```rust,ignore
/// use stepburst::{AxisSystem, SharedAxis};
///
/// let system = AxisSystem::from_config(stepburst::load_config("axes.toml")?);
///
/// // Engine only, ticked from a timer interrupt
/// let x = SharedAxis::new(system.engine("x")?);
///
/// // Or a complete driver with its pins
/// let y = system.build_axis("y", step_y, dir_y, en_y, delay)?;
/// ```
pub struct AxisSystem {
    config: SystemConfig,
}

impl AxisSystem {
    /// Create a new axis system from configuration.
    pub fn from_config(config: SystemConfig) -> Self {
        Self { config }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get an axis configuration by name.
    pub fn axis_config(&self, name: &str) -> Option<&AxisConfig> {
        self.config.axis(name)
    }

    /// Check if an axis name exists in the configuration.
    pub fn has_axis(&self, name: &str) -> bool {
        self.config.axis(name).is_some()
    }

    /// List all configured axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.config.axis_names()
    }

    /// Get the scaled per-tick limits of an axis.
    pub fn limits(&self, name: &str) -> Option<ScaledLimits> {
        self.config.axis(name).map(ScaledLimits::from_config)
    }

    /// Build a disabled engine for an axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis name doesn't exist.
    pub fn engine(&self, name: &str) -> Result<MotionEngine> {
        self.require(name).map(MotionEngine::from_config)
    }

    /// Estimate a move of `distance` steps on an axis.
    pub fn estimate(&self, name: &str, distance: i32) -> Result<MoveEstimate> {
        Ok(self.engine(name)?.estimate(distance))
    }

    /// Build a driver for an axis from its hardware.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis name doesn't exist or building fails.
    pub fn build_axis<STEP, DIR, EN, DELAY>(
        &self,
        name: &str,
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
    ) -> Result<AxisDriver<STEP, DIR, EN, DELAY, Disabled>>
    where
        STEP: OutputPin,
        DIR: OutputPin,
        EN: OutputPin,
        DELAY: DelayNs,
    {
        let axis_config = self.require(name)?;

        AxisDriverBuilder::new()
            .step_pin(step_pin)
            .dir_pin(dir_pin)
            .enable_pin(enable_pin)
            .delay(delay)
            .from_axis_config(axis_config)
            .build()
    }

    fn require(&self, name: &str) -> Result<&AxisConfig> {
        self.config.axis(name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }
}
