//! Drive feedback input.
//!
//! Servo-style step/direction drives report "move done" or "torque at limit"
//! on an open-collector output that pulls the line low when asserted.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::error::{AxisError, Result};

/// Active-low feedback line from the drive.
pub struct FeedbackInput<PIN: InputPin> {
    pin: PIN,
}

impl<PIN: InputPin> FeedbackInput<PIN> {
    /// Wrap an input pin.
    pub fn new(pin: PIN) -> Self {
        Self { pin }
    }

    /// Sample the line. Low means asserted.
    pub fn is_asserted(&mut self) -> Result<bool> {
        self.pin.is_low().map_err(|_| AxisError::PinError.into())
    }

    /// Poll every `poll_us` until asserted or `timeout_us` has passed.
    ///
    /// Returns whether the line was seen asserted.
    pub fn wait_asserted<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout_us: u32,
        poll_us: u32,
    ) -> Result<bool> {
        let poll_us = poll_us.max(1);
        let mut waited = 0u32;
        loop {
            if self.is_asserted()? {
                return Ok(true);
            }
            if waited >= timeout_us {
                return Ok(false);
            }
            delay.delay_us(poll_us);
            waited = waited.saturating_add(poll_us);
        }
    }

    /// Take the pin back.
    pub fn release(self) -> PIN {
        self.pin
    }
}
