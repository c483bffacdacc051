//! Configuration validation.

use heapless::{String, Vec};

use crate::error::{ConfigError, Error, Result};

use super::device::DeviceConfig;
use super::system::{RobotConfig, MAX_DEVICES, MAX_SENSORS};

/// Validate a robot configuration.
///
/// Checks:
/// - Device configurations are internally valid
/// - Device and sensor bus ids are unique
/// - Remote feedback references a declared sensor
/// - Mechanism roles reference declared devices, each device at most once
/// - The intake deploy arm is limit-wired and fed by its deploy sensor
pub fn validate_config(config: &RobotConfig) -> Result<()> {
    let mut ids: Vec<u8, { MAX_DEVICES + MAX_SENSORS }> = Vec::new();

    for (name, entry) in config.devices.iter() {
        validate_device(name.as_str(), &entry.config)?;
        claim_id(&mut ids, entry.id)?;

        if let Some(remote) = entry.config.feedback.remote_sensor() {
            if !config.sensors.values().any(|id| *id == remote) {
                return Err(Error::Config(ConfigError::SensorNotFound(name.clone())));
            }
        }
    }

    for (_, id) in config.sensors.iter() {
        claim_id(&mut ids, *id)?;
    }

    // Mechanism references
    let roles = config.mechanism_roles();
    for (i, (_, device)) in roles.iter().enumerate() {
        if config.device(device).is_none() {
            return Err(Error::Config(ConfigError::DeviceNotFound(name_of(device))));
        }
        if roles[..i].iter().any(|(_, other)| other == device) {
            return Err(Error::Config(ConfigError::DeviceReused(name_of(device))));
        }
    }

    validate_deploy_axis(config)?;

    Ok(())
}

/// Validate a single device configuration.
pub fn validate_device(name: &str, config: &DeviceConfig) -> Result<()> {
    let feedback = &config.feedback;
    for ratio in [feedback.rotor_to_sensor_ratio, feedback.sensor_to_mechanism_ratio] {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidGearRatio(ratio)));
        }
    }

    // Remote and fused sources need a sensor to read
    if feedback.source.is_remote() && feedback.remote_sensor_id.is_none() {
        return Err(Error::Config(ConfigError::MissingRemoteSensor(name_of(name))));
    }

    for (gain, value) in config.slot0.named() {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Config(ConfigError::InvalidGain { gain, value }));
        }
    }

    if let Some(ref profile) = config.motion_profile {
        for (field, value) in [
            ("cruise_velocity", profile.cruise_velocity.0),
            ("acceleration", profile.acceleration.0),
            ("jerk", profile.jerk),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(ConfigError::InvalidMotionProfile { field, value }));
            }
        }
    }

    if let Some(ref limits) = config.hardware_limits {
        if !limits.is_valid() {
            return Err(Error::Config(ConfigError::DuplicateLimitChannel(
                limits.forward.channel,
            )));
        }
    }

    Ok(())
}

fn validate_deploy_axis(config: &RobotConfig) -> Result<()> {
    let intake = &config.intake;
    let sensor = config
        .sensor(intake.deploy_sensor.as_str())
        .ok_or_else(|| Error::Config(ConfigError::SensorNotFound(intake.deploy_sensor.clone())))?;

    let deploy = config
        .device(intake.deploy.as_str())
        .ok_or_else(|| Error::Config(ConfigError::DeviceNotFound(intake.deploy.clone())))?;

    let wired = deploy
        .config
        .hardware_limits
        .map(|l| l.is_fully_enabled())
        .unwrap_or(false);
    if !wired {
        return Err(Error::Config(ConfigError::LimitWiringRequired(
            intake.deploy.clone(),
        )));
    }

    if deploy.config.feedback.remote_sensor() != Some(sensor) {
        return Err(Error::Config(ConfigError::FeedbackMismatch {
            device: intake.deploy.clone(),
            expected: sensor,
        }));
    }

    Ok(())
}

fn claim_id<const N: usize>(ids: &mut Vec<u8, N>, id: u8) -> Result<()> {
    if ids.contains(&id) || ids.push(id).is_err() {
        return Err(Error::Config(ConfigError::DuplicateDeviceId(id)));
    }
    Ok(())
}

fn name_of(name: &str) -> String<32> {
    String::try_from(name).unwrap_or_default()
}
