//! TOML loading of axis tables (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Read an axis table from a TOML file and validate every axis.
///
/// # Errors
///
/// `ConfigError::IoError` when the file cannot be read, otherwise whatever
/// [`parse_config`] reports.
///
/// # Example
///
/// ```rust,ignore
/// let config = stepburst::load_config("axes.toml")?;
/// let x = config.axis("x").ok_or("no x axis")?;
/// assert_eq!(x.tick_rate.hz(), 2000);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse an `[axes.<name>]` table.
///
/// Omitted keys take their defaults (2 kHz ticks, Q10, unbounded travel).
/// A `fractional_bits` outside 1..=16 fails during deserialization; zero
/// rates and inverted bounds fail validation afterwards.
///
/// # Errors
///
/// `ConfigError::ParseError` for malformed TOML, or the first validation
/// failure.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;
    Ok(config)
}

/// Copy as much of `msg` as fits into a fixed-capacity string.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
