//! Engine shared between the tick interrupt and ordinary program flow.
//!
//! Every access runs inside a `critical_section`, so a tick can never observe
//! a half-applied command (a new target next to stale timing, for example).
//! Sections are short and never block.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::units::{CountsPerSec, CountsPerSecSquared, Steps};
use crate::motion::{Direction, MotionEngine, ProfilePhase};

/// Consistent copy of an engine's status taken in one critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSnapshot {
    /// Profile phase.
    pub phase: ProfilePhase,
    /// Whether a command is outstanding.
    pub command_pending: bool,
    /// Whole steps emitted since the last enable.
    pub commanded_position: Steps,
    /// Direction of the latest command.
    pub direction: Direction,
    /// Velocity, Q units per tick.
    pub velocity_q: i64,
}

/// A [`MotionEngine`] behind a critical-section mutex.
///
/// Place one in a `static` (or share a reference) and call
/// [`SharedAxis::advance_one_tick`] from the timer interrupt while commands
/// arrive from the main loop.
pub struct SharedAxis {
    inner: Mutex<RefCell<MotionEngine>>,
}

impl SharedAxis {
    /// Share an engine.
    pub const fn new(engine: MotionEngine) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut MotionEngine) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// See [`MotionEngine::advance_one_tick`].
    pub fn advance_one_tick(&self) -> i32 {
        self.with(|engine| engine.advance_one_tick())
    }

    /// See [`MotionEngine::accept_move`].
    pub fn accept_move(&self, distance: i32) -> bool {
        self.with(|engine| engine.accept_move(distance))
    }

    /// See [`MotionEngine::accept_fast_move`].
    pub fn accept_fast_move(&self, distance: i32) -> bool {
        self.with(|engine| engine.accept_fast_move(distance))
    }

    /// See [`MotionEngine::request_stop_over_distance`].
    pub fn request_stop_over_distance(&self, distance: u32) {
        self.with(|engine| engine.request_stop_over_distance(distance))
    }

    /// See [`MotionEngine::halt_immediately`].
    pub fn halt_immediately(&self) {
        self.with(|engine| engine.halt_immediately())
    }

    /// See [`MotionEngine::enable`].
    pub fn enable(&self) {
        self.with(|engine| engine.enable())
    }

    /// See [`MotionEngine::disable`].
    pub fn disable(&self) {
        self.with(|engine| engine.disable())
    }

    /// See [`MotionEngine::configure_velocity_limit`].
    pub fn configure_velocity_limit(&self, velocity: CountsPerSec) {
        self.with(|engine| engine.configure_velocity_limit(velocity))
    }

    /// See [`MotionEngine::configure_acceleration_limit`].
    pub fn configure_acceleration_limit(&self, acceleration: CountsPerSecSquared) {
        self.with(|engine| engine.configure_acceleration_limit(acceleration))
    }

    /// See [`MotionEngine::configure_travel_bounds`].
    pub fn configure_travel_bounds(&self, min_counts: i64, max_counts: i64) {
        self.with(|engine| engine.configure_travel_bounds(min_counts, max_counts))
    }

    /// See [`MotionEngine::is_command_pending`].
    pub fn is_command_pending(&self) -> bool {
        self.with(|engine| engine.is_command_pending())
    }

    /// Read all status fields at once.
    pub fn snapshot(&self) -> AxisSnapshot {
        self.with(|engine| AxisSnapshot {
            phase: engine.phase(),
            command_pending: engine.is_command_pending(),
            commanded_position: engine.commanded_position(),
            direction: engine.current_direction(),
            velocity_q: engine.velocity_q(),
        })
    }

    /// Take the engine back.
    pub fn into_inner(self) -> MotionEngine {
        self.inner.into_inner().into_inner()
    }
}
