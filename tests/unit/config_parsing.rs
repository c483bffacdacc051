//! Unit tests for TOML configuration parsing.

use actuator_core::config::{
    load_config, parse_config, DeviceConfig, FeedbackSource, Inversion, NeutralMode,
    SwitchPolarity,
};
use actuator_core::error::{ConfigError, Error};
use actuator_core::{Orientation, RotationsPerSec, ShotPoint, OperatingPointPolicy};

const REFERENCE: &str = include_str!("../../robot.toml");

/// Test parsing a standalone device descriptor.
#[test]
fn test_parse_device_config() {
    let toml_str = r#"
inverted = "clockwise_positive"
neutral_mode = "brake"
feedback = { source = "rotor_sensor", rotor_to_sensor_ratio = 12.0, sensor_to_mechanism_ratio = 1.0 }
slot0 = { kp = 0.1, ki = 0.0, kd = 0.002, ks = 0.0, kv = 0.0 }
"#;

    let config: DeviceConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.inverted, Inversion::ClockwisePositive);
    assert_eq!(config.neutral_mode, NeutralMode::Brake);
    assert_eq!(config.feedback.source, FeedbackSource::RotorSensor);
    assert_eq!(config.feedback.rotor_to_sensor_ratio, 12.0);
    assert_eq!(config.slot0.kd, 0.002);
    assert!(config.motion_profile.is_none());
    assert!(config.hardware_limits.is_none());
}

/// Test parsing limit wiring with explicit polarity.
#[test]
fn test_parse_limit_polarity() {
    let toml_str = r#"
inverted = "counter_clockwise_positive"
neutral_mode = "brake"
feedback = { source = "remote_sensor", remote_sensor_id = 30, rotor_to_sensor_ratio = 1.0, sensor_to_mechanism_ratio = 1.0 }
slot0 = { kp = 1.0, ki = 0.0, kd = 0.0, ks = 0.0, kv = 0.0 }

[hardware_limits.forward]
channel = 4
enabled = true
polarity = "normally_closed"

[hardware_limits.reverse]
channel = 5
enabled = true
"#;

    let config: DeviceConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let limits = config.hardware_limits.expect("limits missing");

    assert_eq!(limits.forward.polarity, SwitchPolarity::NormallyClosed);
    assert_eq!(limits.reverse.polarity, SwitchPolarity::NormallyOpen);
    assert_eq!(config.feedback.remote_sensor(), Some(30));
}

/// Test that a device missing its gains does not parse.
#[test]
fn test_missing_gains_rejected() {
    let toml_str = r#"
inverted = "clockwise_positive"
neutral_mode = "coast"
feedback = { source = "rotor_sensor", rotor_to_sensor_ratio = 1.0, sensor_to_mechanism_ratio = 1.0 }
"#;

    let result: Result<DeviceConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that a partially specified gain slot does not parse.
#[test]
fn test_partial_gains_rejected() {
    let toml_str = r#"
inverted = "clockwise_positive"
neutral_mode = "coast"
feedback = { source = "rotor_sensor", rotor_to_sensor_ratio = 1.0, sensor_to_mechanism_ratio = 1.0 }
slot0 = { kp = 0.1 }
"#;

    let result: Result<DeviceConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test the shipped reference configuration.
#[test]
fn test_reference_config_mechanisms() {
    let config = parse_config(REFERENCE).expect("reference config invalid");

    assert_eq!(config.shooter.primary.as_str(), "shooter_a");
    assert_eq!(config.shooter.follower.as_deref(), Some("shooter_b"));
    assert_eq!(config.shooter.orientation, Orientation::Opposed);
    assert_eq!(config.intake.deploy_sensor.as_str(), "deploy_encoder");
    assert_eq!(config.feeder.motor.as_str(), "feeder");
    assert_eq!(config.climber.motor.as_str(), "climber");

    let points = &config.shooter.points;
    assert!(!points.hood_enabled);
    assert_eq!(points.select(ShotPoint::Mid).velocity, RotationsPerSec(75.0));
}

/// Test the reference tuning survives parsing.
#[test]
fn test_reference_tuning() {
    let config = parse_config(REFERENCE).expect("reference config invalid");

    let climber = config.device("climber").unwrap();
    assert_eq!(climber.id, 19);
    assert_eq!(climber.config.neutral_mode, NeutralMode::Brake);
    assert_eq!(climber.config.slot0.kp, 0.1);

    let deploy = config.device("intake_deploy").unwrap();
    assert_eq!(deploy.config.slot0.kp, 0.001);
    assert_eq!(deploy.config.slot0.ks, 0.001);
    let limits = deploy.config.hardware_limits.unwrap();
    assert_eq!((limits.forward.channel, limits.reverse.channel), (0, 1));
}

/// Test that omitted operating points fall back to the default table.
#[test]
fn test_default_operating_points() {
    let trimmed = REFERENCE.replace(
        "[shooter.points]\nhood_enabled = false\nlow = { velocity_rps = 50.0, hood_rotations = 0.1 }\nmid = { velocity_rps = 75.0, hood_rotations = 0.2 }\nhigh = { velocity_rps = 100.0, hood_rotations = 0.3 }\n",
        "",
    );
    assert_ne!(trimmed, REFERENCE);

    let config = parse_config(&trimmed).expect("config without points invalid");
    assert_eq!(
        config.shooter.points.select(ShotPoint::High).velocity,
        RotationsPerSec(100.0)
    );
}

/// Test malformed TOML reports a parse error.
#[test]
fn test_malformed_toml() {
    let result = parse_config("[devices.shooter_a\nid = 0");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_reference_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/robot.toml");
    let config = load_config(path).expect("failed to load robot.toml");
    assert_eq!(config.devices.len(), 7);
}
