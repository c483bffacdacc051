//! Unit tests for configuration validation.

use actuator_core::config::{parse_config, validate_config};
use actuator_core::error::{ConfigError, Error};

const REFERENCE: &str = include_str!("../../robot.toml");

fn edited(from: &str, to: &str) -> String {
    let edited = REFERENCE.replace(from, to);
    assert_ne!(edited, REFERENCE, "edit did not apply: {}", from);
    edited
}

/// Test validation of the reference configuration.
#[test]
fn test_reference_passes_validation() {
    let config = parse_config(REFERENCE).expect("reference config invalid");
    assert!(validate_config(&config).is_ok());
}

/// Test two devices on one bus id.
#[test]
fn test_duplicate_device_id() {
    let result = parse_config(&edited("[devices.feeder]\nid = 3", "[devices.feeder]\nid = 2"));
    assert_eq!(result.err(), Some(Error::Config(ConfigError::DuplicateDeviceId(2))));
}

/// Test a device sharing an id with a remote sensor.
#[test]
fn test_device_collides_with_sensor() {
    let result = parse_config(&edited("[devices.climber]\nid = 19", "[devices.climber]\nid = 22"));
    assert_eq!(result.err(), Some(Error::Config(ConfigError::DuplicateDeviceId(22))));
}

/// Test a mechanism naming an undeclared device.
#[test]
fn test_unknown_mechanism_device() {
    let result = parse_config(&edited("motor = \"climber\"", "motor = \"winch\""));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DeviceNotFound(ref name))) if name.as_str() == "winch"
    ));
}

/// Test one device claimed by two mechanisms.
#[test]
fn test_device_reused() {
    let result = parse_config(&edited("motor = \"climber\"", "motor = \"feeder\""));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DeviceReused(_)))
    ));
}

/// Test a shooter following itself.
#[test]
fn test_shooter_follower_is_primary() {
    let result = parse_config(&edited("follower = \"shooter_b\"", "follower = \"shooter_a\""));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DeviceReused(_)))
    ));
}

/// Test the deploy arm without a reverse limit.
#[test]
fn test_deploy_requires_both_limits() {
    let result = parse_config(&edited(
        "reverse = { channel = 1, enabled = true }",
        "reverse = { channel = 1, enabled = false }",
    ));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::LimitWiringRequired(_)))
    ));
}

/// Test the deploy arm reading the wrong sensor.
#[test]
fn test_deploy_feedback_mismatch() {
    let with_spare = edited("deploy_encoder = 22", "deploy_encoder = 22\nspare_encoder = 23");
    let result = parse_config(&with_spare.replace("remote_sensor_id = 22", "remote_sensor_id = 23"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::FeedbackMismatch { expected: 22, .. }))
    ));
}

/// Test remote feedback naming an undeclared sensor.
#[test]
fn test_undeclared_remote_sensor() {
    let result = parse_config(&edited("remote_sensor_id = 22", "remote_sensor_id = 40"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::SensorNotFound(_)))
    ));
}

/// Test negative gear ratio.
#[test]
fn test_invalid_gear_ratio() {
    let result = parse_config(&edited(
        "id = 19\n\n[devices.climber.config]\ninverted = \"clockwise_positive\"\nneutral_mode = \"brake\"\nfeedback = { source = \"rotor_sensor\", rotor_to_sensor_ratio = 1.0",
        "id = 19\n\n[devices.climber.config]\ninverted = \"clockwise_positive\"\nneutral_mode = \"brake\"\nfeedback = { source = \"rotor_sensor\", rotor_to_sensor_ratio = -25.0",
    ));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGearRatio(r))) if r == -25.0
    ));
}

/// Test zero motion profile acceleration.
#[test]
fn test_invalid_motion_profile() {
    let result = parse_config(&edited("acceleration_rps2 = 8.0", "acceleration_rps2 = 0.0"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMotionProfile {
            field: "acceleration",
            ..
        }))
    ));
}

/// Test both limit switches on one channel.
#[test]
fn test_shared_limit_channel() {
    let result = parse_config(&edited(
        "reverse = { channel = 1, enabled = true }",
        "reverse = { channel = 0, enabled = true }",
    ));
    assert_eq!(
        result.err(),
        Some(Error::Config(ConfigError::DuplicateLimitChannel(0)))
    );
}
