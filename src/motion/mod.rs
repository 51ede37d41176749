//! Motion module for stepburst.
//!
//! Provides the fixed-point representation, the per-tick profile engine and
//! the quantizer that turns sub-step motion into whole-step bursts.

mod engine;
mod fixed;
mod profile;
mod quantizer;

pub use engine::{MotionEngine, DECEL_TICK_BUDGET};
pub use fixed::{QFormat, MAX_STEPS_PER_TICK};
pub use profile::{Direction, MoveEstimate, ProfilePhase, ProfileTiming};
pub use quantizer::StepQuantizer;
