//! Motion profile vocabulary: direction, phase, tick timing and estimates.

use libm::sqrtf;

use crate::config::units::TickRate;

use super::fixed::QFormat;

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive step count.
    #[default]
    Forward,
    /// Negative step count.
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// True for [`Direction::Forward`].
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// Phase of the per-tick profile state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfilePhase {
    /// No motion in progress; a pending command is picked up here.
    #[default]
    Idle,
    /// Accelerating toward the velocity limit or the half-way point. Also
    /// covers the cruise that follows a velocity-limit latch.
    RampUp,
    /// Second half of the move: cruise until the ramp-down tick, then
    /// decelerate to the target.
    CruiseOrRampDown,
    /// Unlimited-acceleration move, capped per tick.
    FastBurst,
    /// Distance-bounded stop requested; computed on the next tick.
    DecelSetup,
    /// Closed-loop deceleration toward the stop point.
    DecelRun,
}

impl ProfilePhase {
    /// True while the axis is executing a move.
    #[inline]
    pub fn is_moving(self) -> bool {
        self != ProfilePhase::Idle
    }
}

/// Tick counters of the current move.
///
/// `ramp_up_end` is 0 until latched; once a move starts the tick counter is at
/// least 1, so 0 is never a latched value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileTiming {
    /// Current tick.
    pub now: u32,
    /// Tick at which ramp-up ended (velocity limit or half-way point).
    pub ramp_up_end: u32,
    /// Tick at which the second half of the move started.
    pub phase2_start: u32,
    /// Tick at which ramp-down starts.
    pub ramp_down_start: u32,
    /// Planned total duration in ticks.
    pub total: u32,
}

impl ProfileTiming {
    /// Mirror the ramp-up around the half-way tick.
    ///
    /// Ramp-down takes as long as ramp-up did, so it starts at
    /// `2*phase2_start - ramp_up_end` and the move lasts `2*phase2_start`.
    pub fn mirror_at(&mut self, tick: u32) {
        if self.ramp_up_end == 0 {
            self.ramp_up_end = tick;
        }
        self.phase2_start = tick;
        self.ramp_down_start = (tick << 1).saturating_sub(self.ramp_up_end);
        self.total = tick << 1;
    }

    /// Whether ramp-up and ramp-down are time-symmetric.
    pub fn is_symmetric(&self) -> bool {
        self.ramp_down_start == (self.phase2_start << 1).saturating_sub(self.ramp_up_end)
            && self.total == self.phase2_start << 1
    }

    /// Ticks spent cruising at the velocity limit, both halves together.
    pub fn cruise_ticks(&self) -> u32 {
        self.ramp_down_start.saturating_sub(self.ramp_up_end)
    }
}

/// Analytic estimate of a move under given limits.
///
/// Computed in floating point from the continuous kinematics; the tick engine
/// lands within a few percent of it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveEstimate {
    /// Move length in whole steps (absolute value).
    pub steps: u32,
    /// Ticks spent accelerating (and again decelerating).
    pub ramp_ticks: f32,
    /// Ticks spent at the velocity limit.
    pub cruise_ticks: f32,
    /// Peak velocity in steps per tick.
    pub peak_steps_per_tick: f32,
    /// True when the velocity limit is never reached.
    pub triangular: bool,
}

impl MoveEstimate {
    /// Estimate a move of `distance` steps with Q-format limits.
    pub fn new(distance: i64, velocity_limit_q: i64, acceleration_limit_q: i64, q: QFormat) -> Self {
        let steps = distance.unsigned_abs().min(u32::MAX as u64) as u32;
        let one = q.one() as f32;
        let d = steps as f32;
        let v = velocity_limit_q.max(1) as f32 / one;
        let a = acceleration_limit_q.max(1) as f32 / one;

        // Each ramp covers v²/2a; both together need v²/a.
        if v * v / a >= d {
            let ramp_ticks = sqrtf(d / a);
            Self {
                steps,
                ramp_ticks,
                cruise_ticks: 0.0,
                peak_steps_per_tick: a * ramp_ticks,
                triangular: true,
            }
        } else {
            Self {
                steps,
                ramp_ticks: v / a,
                cruise_ticks: (d - v * v / a) / v,
                peak_steps_per_tick: v,
                triangular: false,
            }
        }
    }

    /// Total ticks of the move.
    #[inline]
    pub fn total_ticks(&self) -> f32 {
        2.0 * self.ramp_ticks + self.cruise_ticks
    }

    /// Duration in seconds at the given tick rate.
    #[inline]
    pub fn duration_secs(&self, tick: TickRate) -> f32 {
        self.total_ticks() * tick.period_secs()
    }
}
