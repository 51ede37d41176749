//! Unit tests for TOML configuration parsing.

use stepburst::config::{load_config, SystemConfig, TravelBounds};

/// Test parsing a complete axis configuration from TOML.
#[test]
fn test_parse_axis_config() {
    let toml_str = r#"
[axes.z]
name = "lift"
max_velocity_counts_per_sec = 50000
max_acceleration_counts_per_sec2 = 100000
tick_rate_hz = 4000
fractional_bits = 12
invert_direction = true
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("z").expect("Axis not found");

    assert_eq!(axis.name.as_str(), "lift");
    assert_eq!(axis.max_velocity.value(), 50_000);
    assert_eq!(axis.max_acceleration.value(), 100_000);
    assert_eq!(axis.tick_rate.hz(), 4000);
    assert_eq!(axis.fractional_bits.bits(), 12);
    assert!(axis.invert_direction);
    assert_eq!(axis.direction_setup_us, 1000);
    assert_eq!(axis.step_pulse_ns, 2000);
}

/// Test parsing travel bounds, including a one-sided bound.
#[test]
fn test_parse_axis_with_bounds() {
    let toml_str = r#"
[axes.z]
name = "lift"
max_velocity_counts_per_sec = 50000
max_acceleration_counts_per_sec2 = 100000

[axes.z.bounds]
max_counts = 54400
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let bounds = config.axis("z").expect("Axis not found").bounds;

    assert_eq!(bounds, TravelBounds::new(i64::MIN, 54_400));
}

/// Test that out-of-range fractional bits are rejected during parsing.
#[test]
fn test_invalid_fractional_bits_rejected() {
    let toml_str = r#"
[axes.z]
name = "lift"
max_velocity_counts_per_sec = 50000
max_acceleration_counts_per_sec2 = 100000
fractional_bits = 20
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Should reject fractional bits above 16");
}

/// Test that a missing velocity is a parse error.
#[test]
fn test_missing_velocity_rejected() {
    let toml_str = r#"
[axes.z]
name = "lift"
max_acceleration_counts_per_sec2 = 100000
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading configuration from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("stepburst-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 20000
"#,
    )
    .unwrap();

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert!(config.axis("x").is_some());
}
