//! Error types for stepburst.
//!
//! Provides unified error handling across configuration, the motion engine and
//! the axis I/O adapter. Command acceptance itself never errors: a busy axis
//! rejects a new command by returning `false`.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepburst operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion engine error
    Motion(MotionError),
    /// Axis I/O error
    Axis(AxisError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Fractional bit width outside 1..=16
    InvalidFractionalBits(u8),
    /// Tick rate must be > 0 Hz
    InvalidTickRate(u32),
    /// Max velocity must be > 0 counts/sec
    InvalidMaxVelocity(u32),
    /// Max acceleration must be > 0 counts/sec²
    InvalidMaxAcceleration(u32),
    /// Invalid travel bounds (min must be < max)
    InvalidTravelBounds {
        /// Lower bound in counts
        min: i64,
        /// Upper bound in counts
        max: i64,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// The fractional bit width can only change before the first command.
    FractionalBitsLocked,
}

/// Axis I/O errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidFractionalBits(v) => {
                write!(f, "Invalid fractional bits: {}. Must be 1-16", v)
            }
            ConfigError::InvalidTickRate(v) => write!(f, "Invalid tick rate: {} Hz. Must be > 0", v),
            ConfigError::InvalidMaxVelocity(v) => {
                write!(f, "Invalid max velocity: {} counts/s. Must be > 0", v)
            }
            ConfigError::InvalidMaxAcceleration(v) => {
                write!(f, "Invalid max acceleration: {} counts/s². Must be > 0", v)
            }
            ConfigError::InvalidTravelBounds { min, max } => {
                write!(f, "Invalid travel bounds: min ({}) must be < max ({})", min, max)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::FractionalBitsLocked => {
                write!(f, "Fractional bits cannot change after the first command")
            }
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}
