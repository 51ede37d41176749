//! Per-tick motion profile engine.
//!
//! One [`MotionEngine`] owns all kinematic state of one axis. A periodic tick
//! source calls [`MotionEngine::advance_one_tick`] at a fixed frequency; every
//! call returns the signed number of whole steps to pulse during that tick.
//!
//! All arithmetic is integer fixed point (see [`QFormat`]). Position, velocity
//! and acceleration are integrated with sub-step resolution and the
//! [`StepQuantizer`] turns the position integral into whole-step bursts, so
//! the bursts of one command always sum to exactly the commanded distance.

use crate::axis::Position;
use crate::config::units::{CountsPerSec, CountsPerSecSquared, Steps, TickRate};
use crate::config::{AxisConfig, ScaledLimits, TravelBounds};
use crate::error::MotionError;

use super::fixed::{QFormat, MAX_STEPS_PER_TICK};
use super::profile::{Direction, MoveEstimate, ProfilePhase, ProfileTiming};
use super::quantizer::StepQuantizer;

/// Tick budget of a distance-bounded stop before it is forced to finish.
pub const DECEL_TICK_BUDGET: u32 = 550_000;

/// Motion profile engine for one axis.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    /// Fixed-point format of all kinematic state
    q: QFormat,
    /// Set once a command has been accepted; freezes `q`
    q_locked: bool,

    // Configured rates, kept so a Q-format change can rescale them
    max_velocity: CountsPerSec,
    max_acceleration: CountsPerSecSquared,
    tick_rate: TickRate,
    limits: ScaledLimits,
    bounds: TravelBounds,

    enabled: bool,
    direction: Direction,
    /// Magnitude of the outstanding command; 0 when none
    pending: u32,
    phase: ProfilePhase,

    position_q: i64,
    velocity_q: i64,
    acceleration_q: i64,
    /// Signed acceleration used for ramp-up; ramp-down uses its negation
    ramp_acceleration_q: i64,
    target_q: i64,
    half_move_q: i64,
    /// Half-way point seen on the previous tick
    half_reached: bool,
    timing: ProfileTiming,

    /// Requested stopping distance, whole steps
    stop_distance: u32,

    quantizer: StepQuantizer,
    position: Position,
}

impl MotionEngine {
    /// Create a disabled engine at the 2 kHz baseline tick with 10 fractional
    /// bits and no travel bounds.
    pub fn new(max_velocity: CountsPerSec, max_acceleration: CountsPerSecSquared) -> Self {
        let q = QFormat::DEFAULT;
        let tick_rate = TickRate::BASELINE;

        Self {
            q,
            q_locked: false,
            max_velocity,
            max_acceleration,
            tick_rate,
            limits: ScaledLimits::scale(max_velocity, max_acceleration, tick_rate, q),
            bounds: TravelBounds::UNBOUNDED,
            enabled: false,
            direction: Direction::Forward,
            pending: 0,
            phase: ProfilePhase::Idle,
            position_q: 0,
            velocity_q: 0,
            acceleration_q: 0,
            ramp_acceleration_q: 0,
            target_q: 0,
            half_move_q: 0,
            half_reached: false,
            timing: ProfileTiming::default(),
            stop_distance: 0,
            quantizer: StepQuantizer::new(),
            position: Position::new(),
        }
    }

    /// Create an engine from axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        let mut engine = Self::new(config.max_velocity, config.max_acceleration);
        engine.q = config.fractional_bits;
        engine.tick_rate = config.tick_rate;
        engine.bounds = config.bounds;
        engine.rescale();
        engine
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Enable motion. The commanded position restarts at 0.
    pub fn enable(&mut self) {
        self.position.set_origin();
        self.enabled = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("axis enabled");
    }

    /// Stop immediately and disable motion.
    pub fn disable(&mut self) {
        self.halt_immediately();
        self.enabled = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("axis disabled");
    }

    /// Whether ticks produce motion.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Accept a relative move of `distance` steps.
    ///
    /// Returns `false` without touching any state when a command is already
    /// outstanding. The profile itself is set up on the next tick.
    pub fn accept_move(&mut self, distance: i32) -> bool {
        if self.pending != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("move {} rejected: busy", distance);
            return false;
        }

        self.latch(distance);

        #[cfg(feature = "defmt")]
        defmt::debug!("move {} accepted", distance);
        true
    }

    /// Accept a relative move that ignores the acceleration limit.
    ///
    /// The axis jumps toward the target by at most [`MAX_STEPS_PER_TICK`]
    /// steps per tick. Same busy rule as [`Self::accept_move`].
    pub fn accept_fast_move(&mut self, distance: i32) -> bool {
        if self.pending != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("fast move {} rejected: busy", distance);
            return false;
        }

        self.reset_kinematics();
        self.latch(distance);
        if self.pending != 0 {
            self.enter(ProfilePhase::FastBurst);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("fast move {} accepted", distance);
        true
    }

    /// Decelerate to rest within `distance` steps.
    ///
    /// The distance is shortened to the room left before the travel bound in
    /// the direction of travel. Takes effect on the next tick; ignored when no
    /// command is outstanding.
    pub fn request_stop_over_distance(&mut self, distance: u32) {
        if self.pending == 0 {
            return;
        }

        self.stop_distance = distance;
        self.enter(ProfilePhase::DecelSetup);
    }

    /// Stop at once, dropping the command and all kinematic state.
    ///
    /// Velocity jumps to zero; use [`Self::request_stop_over_distance`] for a
    /// controlled stop.
    pub fn halt_immediately(&mut self) {
        self.reset_kinematics();
        self.pending = 0;
        self.target_q = 0;
        self.enter(ProfilePhase::Idle);
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the velocity ceiling. Saturates at [`MAX_STEPS_PER_TICK`].
    pub fn configure_velocity_limit(&mut self, velocity: CountsPerSec) {
        self.max_velocity = velocity;
        self.rescale();
    }

    /// Set the acceleration ceiling. Saturates at half a step per tick².
    pub fn configure_acceleration_limit(&mut self, acceleration: CountsPerSecSquared) {
        self.max_acceleration = acceleration;
        self.rescale();
    }

    /// Set the frequency the tick advance is called at.
    pub fn configure_tick_rate(&mut self, tick_rate: TickRate) {
        self.tick_rate = tick_rate;
        self.rescale();
    }

    /// Set the soft travel bounds used by the distance-bounded stop.
    pub fn configure_travel_bounds(&mut self, min_counts: i64, max_counts: i64) {
        self.bounds = TravelBounds::new(min_counts, max_counts);
    }

    /// Change the fractional bit width.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::FractionalBitsLocked` once any command has been
    /// accepted.
    pub fn set_fractional_bits(&mut self, q: QFormat) -> Result<(), MotionError> {
        if self.q_locked {
            return Err(MotionError::FractionalBitsLocked);
        }
        self.q = q;
        self.rescale();
        Ok(())
    }

    fn rescale(&mut self) {
        self.limits = ScaledLimits::scale(
            self.max_velocity,
            self.max_acceleration,
            self.tick_rate,
            self.q,
        );
    }

    // ------------------------------------------------------------------
    // Tick advance
    // ------------------------------------------------------------------

    /// Advance one tick and return the signed whole-step burst to emit.
    ///
    /// The tick counter moves even while disabled; a disabled engine returns
    /// 0 without touching kinematic state.
    pub fn advance_one_tick(&mut self) -> i32 {
        self.timing.now = self.timing.now.wrapping_add(1);
        if !self.enabled {
            return 0;
        }

        match self.phase {
            ProfilePhase::Idle => self.tick_idle(),
            ProfilePhase::RampUp => self.tick_ramp_up(),
            ProfilePhase::CruiseOrRampDown => self.tick_ramp_down(),
            ProfilePhase::FastBurst => self.tick_fast_burst(),
            ProfilePhase::DecelSetup => self.tick_decel_setup(),
            ProfilePhase::DecelRun => self.tick_decel_run(),
        }

        let burst = self.quantizer.emit(self.position_q, self.q);
        self.position.apply_burst(burst);
        // Bounded by the per-tick velocity ceiling, or by a one-tick short move.
        burst as i32
    }

    fn tick_idle(&mut self) {
        self.reset_kinematics();
        if self.pending == 0 {
            self.target_q = 0;
            return;
        }

        self.timing.now = 1;
        let sign = self.direction.sign();
        self.target_q = sign * self.q.from_steps(self.pending as i64);
        self.half_move_q = self.target_q.abs() / 2;
        self.ramp_acceleration_q = sign * self.limits.acceleration_q;
        self.acceleration_q = self.ramp_acceleration_q;

        if self.half_move_q <= self.limits.acceleration_q {
            self.finish_at(self.target_q);
            return;
        }

        self.position_q += self.velocity_q;
        self.velocity_q += self.acceleration_q;
        self.enter(ProfilePhase::RampUp);
    }

    fn tick_ramp_up(&mut self) {
        self.integrate();

        let velocity_limit = self.limits.velocity_q;
        if self.timing.ramp_up_end == 0 && self.velocity_q.abs() >= velocity_limit {
            self.velocity_q = self.direction.sign() * velocity_limit;
            self.acceleration_q = 0;
            self.timing.ramp_up_end = self.timing.now;
        }

        if self.position_q.abs() >= self.half_move_q {
            // Wait one tick past the half-way point so both halves match.
            if self.half_reached {
                self.timing.mirror_at(self.timing.now);
                self.acceleration_q = -self.acceleration_q;
                self.enter(ProfilePhase::CruiseOrRampDown);
            }
            self.half_reached = true;
        }
    }

    fn tick_ramp_down(&mut self) {
        self.integrate();

        if self.timing.now >= self.timing.ramp_down_start {
            self.acceleration_q = -self.ramp_acceleration_q;
        }

        if self.timing.now > self.timing.total
            || self.position_q.abs() > self.target_q.abs()
            || self.velocity_q * self.acceleration_q > 0
        {
            self.finish_at(self.target_q);
        }
    }

    fn tick_fast_burst(&mut self) {
        let sign = self.direction.sign();
        self.target_q = sign * self.q.from_steps(self.pending as i64);

        let cap = self.q.from_steps(MAX_STEPS_PER_TICK);
        if (self.target_q - self.position_q).abs() > cap {
            self.position_q += sign * cap;
        } else {
            self.finish_at(self.target_q);
        }
    }

    fn tick_decel_setup(&mut self) {
        let sign = self.direction.sign();
        let room = self
            .bounds
            .room(self.position.steps().value(), self.direction.is_forward());
        let distance = (self.stop_distance as u64).min(room) as i64;

        #[cfg(feature = "defmt")]
        if distance < self.stop_distance as i64 {
            defmt::debug!("stop distance {} clamped to {}", self.stop_distance, distance);
        }

        let distance_q = self.q.from_steps(distance);
        self.target_q = self.position_q + sign * distance_q;
        self.timing.now = 0;
        self.timing.total = DECEL_TICK_BUDGET;

        if self.velocity_q == 0 || distance == 0 || self.velocity_q * sign < 0 {
            self.finish_at(self.position_q);
            return;
        }

        self.acceleration_q = self.stopping_acceleration(distance_q);
        self.enter(ProfilePhase::DecelRun);
    }

    fn tick_decel_run(&mut self) {
        self.integrate();

        let remaining = (self.target_q - self.position_q) * self.direction.sign();
        if self.timing.now > self.timing.total
            || self.position_q.abs() > self.target_q.abs()
            || remaining <= 0
            || self.velocity_q * self.acceleration_q > 0
        {
            // The stop point is wherever the loop converged, never past the target.
            let rest = if remaining < 0 {
                self.target_q
            } else {
                self.position_q
            };
            self.finish_at(rest);
            return;
        }

        self.acceleration_q = self.stopping_acceleration(remaining);
    }

    /// Deceleration that brings the current velocity to rest over
    /// `distance_q`, from `v² = 2ad`.
    ///
    /// At least one Q unit so the stop always progresses; at most the current
    /// speed so a single tick never reverses the axis.
    fn stopping_acceleration(&self, distance_q: i64) -> i64 {
        let speed = self.velocity_q.abs();
        let magnitude = (self.velocity_q * self.velocity_q) / (2 * distance_q);
        let magnitude = magnitude.clamp(1, speed.max(1));
        -self.direction.sign() * magnitude
    }

    fn integrate(&mut self) {
        self.position_q += self.velocity_q + self.acceleration_q / 2;
        self.velocity_q += self.acceleration_q;
    }

    fn finish_at(&mut self, position_q: i64) {
        self.position_q = position_q;
        self.velocity_q = 0;
        self.acceleration_q = 0;
        self.pending = 0;
        self.enter(ProfilePhase::Idle);

        #[cfg(feature = "defmt")]
        defmt::debug!("move complete at {}", self.position.steps().value());
    }

    fn latch(&mut self, distance: i32) {
        self.direction = Direction::from_steps(distance as i64);
        self.pending = distance.unsigned_abs();
        self.q_locked = true;
    }

    fn reset_kinematics(&mut self) {
        self.position_q = 0;
        self.velocity_q = 0;
        self.acceleration_q = 0;
        self.half_reached = false;
        self.timing = ProfileTiming::default();
        self.quantizer.reset();
    }

    fn enter(&mut self, phase: ProfilePhase) {
        #[cfg(feature = "defmt")]
        if phase != self.phase {
            defmt::debug!("phase {} -> {}", self.phase, phase);
        }
        self.phase = phase;
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    /// Whether a command is outstanding.
    #[inline]
    pub fn is_command_pending(&self) -> bool {
        self.pending != 0
    }

    /// Whole steps emitted since the last enable.
    #[inline]
    pub fn commanded_position(&self) -> Steps {
        self.position.steps()
    }

    /// Signed distance from the commanded position to `target`.
    #[inline]
    pub fn distance_to(&self, target: Steps) -> i64 {
        self.position.steps_to(target)
    }

    /// Direction of the latest accepted command.
    #[inline]
    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    /// Current state machine phase.
    #[inline]
    pub fn phase(&self) -> ProfilePhase {
        self.phase
    }

    /// Tick counters of the current move.
    #[inline]
    pub fn timing(&self) -> &ProfileTiming {
        &self.timing
    }

    /// Sub-step position within the current move, Q units.
    #[inline]
    pub fn position_q(&self) -> i64 {
        self.position_q
    }

    /// Velocity, Q units per tick.
    #[inline]
    pub fn velocity_q(&self) -> i64 {
        self.velocity_q
    }

    /// Acceleration, Q units per tick².
    #[inline]
    pub fn acceleration_q(&self) -> i64 {
        self.acceleration_q
    }

    /// Target of the current move, Q units.
    #[inline]
    pub fn target_q(&self) -> i64 {
        self.target_q
    }

    /// Scaled velocity and acceleration ceilings.
    #[inline]
    pub fn limits(&self) -> ScaledLimits {
        self.limits
    }

    /// Soft travel bounds.
    #[inline]
    pub fn bounds(&self) -> TravelBounds {
        self.bounds
    }

    /// Fixed-point format in use.
    #[inline]
    pub fn fractional_bits(&self) -> QFormat {
        self.q
    }

    /// Configured tick rate.
    #[inline]
    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    /// Estimate a move of `distance` steps under the current limits.
    pub fn estimate(&self, distance: i32) -> MoveEstimate {
        MoveEstimate::new(
            distance as i64,
            self.limits.velocity_q,
            self.limits.acceleration_q,
            self.q,
        )
    }
}
