//! # stepburst
//!
//! Fixed-point, per-tick stepper motion profiles with embedded-hal 1.0 support.
//!
//! A periodic timer calls the engine once per tick; each call returns how many
//! whole steps to pulse during that tick. Moves follow a trapezoidal (or
//! triangular) velocity profile bounded by configured velocity and
//! acceleration limits, computed entirely in integer arithmetic.
//!
//! ## Features
//!
//! - **Drift-free**: the bursts of a command always sum to exactly its distance
//! - **Fixed point**: Q-format state with 1..=16 fractional bits, no floats per tick
//! - **Move shapes**: trapezoid, one-tick short move, capped fast burst and
//!   closed-loop deceleration over a bounded distance
//! - **Interrupt safe**: [`SharedAxis`] wraps an engine in a critical section
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/EN, `InputPin` for feedback,
//!   `DelayNs` for timing
//! - **Configuration-driven**: axes defined in TOML files
//! - **Type-state safety**: motion commands only exist on an enabled axis
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepburst::{AxisSystem, load_config};
//!
//! let system = AxisSystem::from_config(load_config("axes.toml")?);
//!
//! let mut x = system
//!     .build_axis("x", step_pin, dir_pin, enable_pin, delay)?
//!     .enable()
//!     .map_err(|(_, e)| e)?;
//!
//! x.move_by(2000)?;
//! while x.is_command_pending() {
//!     x.tick()?; // from a 2 kHz timer
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod motion;

// Re-exports for ergonomic API
pub use axis::{state, AxisDriver, AxisDriverBuilder, AxisSystem, FeedbackInput, SharedAxis};
pub use config::{validate_config, AxisConfig, ScaledLimits, SystemConfig, TravelBounds};
pub use error::{Error, Result};
pub use motion::{Direction, MotionEngine, MoveEstimate, ProfilePhase, QFormat};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{CountsPerSec, CountsPerSecSquared, Steps, TickRate};
