//! Unit tests for configuration validation.

use stepburst::config::{parse_config, validate_config, SystemConfig};
use stepburst::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 20000

[axes.x.bounds]
min_counts = 0
max_counts = 54400
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a zero tick rate.
#[test]
fn test_zero_tick_rate() {
    let toml_str = r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 20000
tick_rate_hz = 0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTickRate(0)))
    ));
}

/// Test validation fails for zero velocity or acceleration.
#[test]
fn test_zero_limits() {
    let zero_velocity = r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 0
max_acceleration_counts_per_sec2 = 20000
"#;
    assert!(matches!(
        parse_config(zero_velocity),
        Err(Error::Config(ConfigError::InvalidMaxVelocity(0)))
    ));

    let zero_acceleration = r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 0
"#;
    assert!(matches!(
        parse_config(zero_acceleration),
        Err(Error::Config(ConfigError::InvalidMaxAcceleration(0)))
    ));
}

/// Test validation fails for invalid travel bounds (min >= max).
#[test]
fn test_invalid_travel_bounds() {
    let toml_str = r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 20000

[axes.x.bounds]
min_counts = 500
max_counts = 500
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTravelBounds { min: 500, max: 500 }))
    ));
}

/// Test that malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_toml() {
    let result = parse_config("[axes.x\nname = ");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that empty configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    let config = SystemConfig::default();
    assert!(validate_config(&config).is_ok());
}
