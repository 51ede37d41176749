//! Configuration module for stepburst.
//!
//! Provides types for loading and validating axis configurations from TOML
//! files (with `std` feature) or pre-parsed data, and for scaling them into
//! the engine's per-tick fixed-point limits.

mod axis;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod scaling;
mod system;
pub mod units;
mod validation;

pub use axis::AxisConfig;
pub use limits::TravelBounds;
pub use scaling::ScaledLimits;
pub use system::SystemConfig;
pub use validation::{validate_axis, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{CountsPerSec, CountsPerSecSquared, Steps, TickRate, UnitExt};
