//! Axis module for stepburst.
//!
//! Provides the step/direction driver with type-state safety, the
//! critical-section wrapper for interrupt-driven ticking, feedback sampling
//! and commanded position tracking.

mod builder;
mod driver;
mod feedback;
mod position;
mod shared;
pub mod state;
mod system;

pub use builder::AxisDriverBuilder;
pub use driver::AxisDriver;
pub use feedback::FeedbackInput;
pub use position::Position;
pub use shared::{AxisSnapshot, SharedAxis};
pub use state::{AxisState, Disabled, Enabled, StateName};
pub use system::AxisSystem;
