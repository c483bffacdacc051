//! Mechanism sections of the robot configuration.
//!
//! Each section names the devices (by their key under `[devices]`) that the
//! mechanism owns.

use heapless::String;
use serde::Deserialize;

use crate::control::Orientation;
use crate::mechanism::OperatingPoints;

/// Dual-flywheel shooter with an adjustable hood.
#[derive(Debug, Clone, Deserialize)]
pub struct ShooterConfig {
    /// Flywheel device that receives requests.
    pub primary: String<32>,

    /// Second flywheel mirroring the primary.
    #[serde(default)]
    pub follower: Option<String<32>>,

    /// Mounting of the follower relative to the primary.
    #[serde(default = "default_shooter_orientation")]
    pub orientation: Orientation,

    /// Hood position device.
    pub hood: String<32>,

    /// Named operating points.
    #[serde(default)]
    pub points: OperatingPoints,
}

fn default_shooter_orientation() -> Orientation {
    Orientation::Opposed
}

/// Ground intake: roller plus a limit-bounded deploy arm.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Roller device.
    pub roller: String<32>,

    /// Deploy arm device.
    pub deploy: String<32>,

    /// Remote absolute sensor on the deploy pivot (key under `[sensors]`).
    pub deploy_sensor: String<32>,
}

/// Feeder between intake and shooter.
#[derive(Debug, Clone, Deserialize)]
pub struct FeederConfig {
    /// Feeder roller device.
    pub motor: String<32>,
}

/// Climber winch.
#[derive(Debug, Clone, Deserialize)]
pub struct ClimberConfig {
    /// Winch device.
    pub motor: String<32>,
}
