//! Axis driver.
//!
//! Generic over embedded-hal 1.0 pin types with type-state safety. Wraps one
//! [`MotionEngine`] and turns its per-tick bursts into STEP pulses, its
//! command direction into the DIR line and its enable flag into EN.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{CountsPerSec, CountsPerSecSquared, Steps};
use crate::error::{AxisError, Error, Result};
use crate::motion::{Direction, MotionEngine, ProfilePhase};

use super::state::{AxisState, Disabled, Enabled, StateName};

/// Step/direction axis driver with type-state safety.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: enable pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `STATE`: Type-state marker (defaults to `Disabled`)
pub struct AxisDriver<STEP, DIR, EN, DELAY, STATE = Disabled>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    STATE: AxisState,
{
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    delay: DELAY,

    engine: MotionEngine,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// DIR settle time after a direction change.
    direction_setup_us: u32,

    /// STEP high and low width.
    step_pulse_ns: u32,

    /// Last level written to DIR (cached to avoid unnecessary pin writes).
    dir_written: Option<Direction>,

    _state: PhantomData<STATE>,
}

impl<STEP, DIR, EN, DELAY, STATE> AxisDriver<STEP, DIR, EN, DELAY, STATE>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    STATE: AxisState + StateName,
{
    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the underlying engine.
    #[inline]
    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    /// Whole steps emitted since the last enable.
    #[inline]
    pub fn commanded_position(&self) -> Steps {
        self.engine.commanded_position()
    }

    /// Whether a command is outstanding.
    #[inline]
    pub fn is_command_pending(&self) -> bool {
        self.engine.is_command_pending()
    }

    /// Current profile phase.
    #[inline]
    pub fn phase(&self) -> ProfilePhase {
        self.engine.phase()
    }

    /// True once a profile is running; stays false for a command latched but
    /// not yet started by a tick.
    pub fn is_moving(&self) -> bool {
        self.engine.phase().is_moving()
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Set the velocity ceiling.
    pub fn configure_velocity_limit(&mut self, velocity: CountsPerSec) {
        self.engine.configure_velocity_limit(velocity);
    }

    /// Set the acceleration ceiling.
    pub fn configure_acceleration_limit(&mut self, acceleration: CountsPerSecSquared) {
        self.engine.configure_acceleration_limit(acceleration);
    }

    /// Set the soft travel bounds.
    pub fn configure_travel_bounds(&mut self, min_counts: i64, max_counts: i64) {
        self.engine.configure_travel_bounds(min_counts, max_counts);
    }

    /// Take the hardware back.
    pub fn release(self) -> (STEP, DIR, EN, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay)
    }

    fn transition<NEXT: AxisState>(self) -> AxisDriver<STEP, DIR, EN, DELAY, NEXT> {
        AxisDriver {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            engine: self.engine,
            name: self.name,
            invert_direction: self.invert_direction,
            direction_setup_us: self.direction_setup_us,
            step_pulse_ns: self.step_pulse_ns,
            dir_written: self.dir_written,
            _state: PhantomData,
        }
    }
}

impl<STEP, DIR, EN, DELAY> AxisDriver<STEP, DIR, EN, DELAY, Disabled>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new driver in the Disabled state.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        engine: MotionEngine,
        name: heapless::String<32>,
        invert_direction: bool,
        direction_setup_us: u32,
        step_pulse_ns: u32,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            engine,
            name,
            invert_direction,
            direction_setup_us,
            step_pulse_ns,
            dir_written: None,
            _state: PhantomData,
        }
    }

    /// Raise EN and enable the engine. The commanded position restarts at 0.
    ///
    /// Returns a driver in the `Enabled` state.
    pub fn enable(
        mut self,
    ) -> core::result::Result<AxisDriver<STEP, DIR, EN, DELAY, Enabled>, (Self, Error)> {
        if self.enable_pin.set_high().is_err() {
            return Err((self, Error::Axis(AxisError::PinError)));
        }

        self.engine.enable();
        Ok(self.transition())
    }
}

impl<STEP, DIR, EN, DELAY> AxisDriver<STEP, DIR, EN, DELAY, Enabled>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Start a relative move of `distance` steps.
    ///
    /// Writes DIR and waits the settle time before the command is accepted,
    /// so the first STEP pulse always sees a stable direction. Returns
    /// `Ok(false)` while a command is outstanding.
    pub fn move_by(&mut self, distance: i32) -> Result<bool> {
        if self.engine.is_command_pending() {
            return Ok(false);
        }

        self.write_direction(Direction::from_steps(distance as i64))?;
        Ok(self.engine.accept_move(distance))
    }

    /// Start a move to an absolute commanded position.
    pub fn move_to(&mut self, target: Steps) -> Result<bool> {
        let distance = self.engine.distance_to(target);
        self.move_by(distance.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    /// Start a relative move without acceleration limiting.
    pub fn move_fast(&mut self, distance: i32) -> Result<bool> {
        if self.engine.is_command_pending() {
            return Ok(false);
        }

        self.write_direction(Direction::from_steps(distance as i64))?;
        Ok(self.engine.accept_fast_move(distance))
    }

    /// Advance the engine one tick and pulse STEP once per emitted step.
    ///
    /// Call at the configured tick rate. Returns the signed burst.
    pub fn tick(&mut self) -> Result<i32> {
        let burst = self.engine.advance_one_tick();
        for _ in 0..burst.unsigned_abs() {
            self.pulse()?;
        }
        Ok(burst)
    }

    /// Decelerate to rest within `distance` steps, clamped to the travel bounds.
    pub fn stop_over_distance(&mut self, distance: u32) {
        self.engine.request_stop_over_distance(distance);
    }

    /// Stop at once.
    pub fn halt(&mut self) {
        self.engine.halt_immediately();
    }

    /// Stop at once, disable the engine and lower EN.
    ///
    /// On a pin error the engine is already stopped and disabled; the driver
    /// is handed back so the caller can retry.
    pub fn disable(
        mut self,
    ) -> core::result::Result<AxisDriver<STEP, DIR, EN, DELAY, Disabled>, (Self, Error)> {
        self.engine.disable();
        if self.enable_pin.set_low().is_err() {
            return Err((self, Error::Axis(AxisError::PinError)));
        }

        Ok(self.transition())
    }

    fn write_direction(&mut self, direction: Direction) -> Result<()> {
        if self.dir_written == Some(direction) {
            return Ok(());
        }

        let pin_high = direction.is_forward() != self.invert_direction;
        if pin_high {
            self.dir_pin.set_high().map_err(|_| AxisError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| AxisError::PinError)?;
        }
        self.delay.delay_us(self.direction_setup_us);

        self.dir_written = Some(direction);
        Ok(())
    }

    fn pulse(&mut self) -> Result<()> {
        self.step_pin.set_high().map_err(|_| AxisError::PinError)?;
        self.delay.delay_ns(self.step_pulse_ns);
        self.step_pin.set_low().map_err(|_| AxisError::PinError)?;
        self.delay.delay_ns(self.step_pulse_ns);
        Ok(())
    }
}
