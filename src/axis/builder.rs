//! Builder pattern for AxisDriver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{CountsPerSec, CountsPerSecSquared, TickRate};
use crate::config::{validate_axis, AxisConfig, SystemConfig, TravelBounds};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{MotionEngine, QFormat};

use super::driver::AxisDriver;
use super::state::Disabled;

/// Builder for creating AxisDriver instances.
pub struct AxisDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    max_velocity: Option<CountsPerSec>,
    max_acceleration: Option<CountsPerSecSquared>,
    tick_rate: TickRate,
    fractional_bits: QFormat,
    bounds: TravelBounds,
    invert_direction: bool,
    direction_setup_us: u32,
    step_pulse_ns: u32,
}

impl<STEP, DIR, EN, DELAY> Default for AxisDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, DELAY> AxisDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        let defaults = AxisConfig::new("axis", CountsPerSec(0), CountsPerSecSquared(0));
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            name: None,
            max_velocity: None,
            max_acceleration: None,
            tick_rate: defaults.tick_rate,
            fractional_bits: defaults.fractional_bits,
            bounds: defaults.bounds,
            invert_direction: defaults.invert_direction,
            direction_setup_us: defaults.direction_setup_us,
            step_pulse_ns: defaults.step_pulse_ns,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the EN pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the velocity ceiling.
    pub fn max_velocity(mut self, velocity: CountsPerSec) -> Self {
        self.max_velocity = Some(velocity);
        self
    }

    /// Set the acceleration ceiling.
    pub fn max_acceleration(mut self, acceleration: CountsPerSecSquared) -> Self {
        self.max_acceleration = Some(acceleration);
        self
    }

    /// Set the tick rate the driver will be ticked at.
    pub fn tick_rate(mut self, tick_rate: TickRate) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set the fixed-point fractional bit width.
    pub fn fractional_bits(mut self, q: QFormat) -> Self {
        self.fractional_bits = q;
        self
    }

    /// Set travel bounds for the distance-bounded stop.
    pub fn bounds(mut self, bounds: TravelBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the DIR settle time in microseconds.
    pub fn direction_setup_us(mut self, us: u32) -> Self {
        self.direction_setup_us = us;
        self
    }

    /// Set the STEP pulse width in nanoseconds.
    pub fn step_pulse_ns(mut self, ns: u32) -> Self {
        self.step_pulse_ns = ns;
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.max_velocity = Some(config.max_velocity);
        self.max_acceleration = Some(config.max_acceleration);
        self.tick_rate = config.tick_rate;
        self.fractional_bits = config.fractional_bits;
        self.bounds = config.bounds;
        self.invert_direction = config.invert_direction;
        self.direction_setup_us = config.direction_setup_us;
        self.step_pulse_ns = config.step_pulse_ns;
        self
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the AxisDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the resulting
    /// configuration is invalid.
    pub fn build(self) -> Result<AxisDriver<STEP, DIR, EN, DELAY, Disabled>> {
        let step_pin = self.step_pin.ok_or_else(|| missing("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or_else(|| missing("dir_pin"))?;
        let enable_pin = self.enable_pin.ok_or_else(|| missing("enable_pin"))?;
        let delay = self.delay.ok_or_else(|| missing("delay"))?;
        let max_velocity = self.max_velocity.ok_or_else(|| missing("max_velocity"))?;
        let max_acceleration = self
            .max_acceleration
            .ok_or_else(|| missing("max_acceleration"))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        let config = AxisConfig {
            name: name.clone(),
            max_velocity,
            max_acceleration,
            tick_rate: self.tick_rate,
            fractional_bits: self.fractional_bits,
            invert_direction: self.invert_direction,
            direction_setup_us: self.direction_setup_us,
            step_pulse_ns: self.step_pulse_ns,
            bounds: self.bounds,
        };
        validate_axis(&config)?;

        Ok(AxisDriver::new(
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            MotionEngine::from_config(&config),
            name,
            self.invert_direction,
            self.direction_setup_us,
            self.step_pulse_ns,
        ))
    }
}

fn missing(field: &str) -> Error {
    let mut msg = heapless::String::<128>::new();
    let _ = msg.push_str(field);
    let _ = msg.push_str(" is required");
    Error::Config(ConfigError::ParseError(msg))
}
