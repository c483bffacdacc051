//! Robot configuration - root configuration structure.

use heapless::{FnvIndexMap, String, Vec};
use serde::Deserialize;

use super::device::DeviceEntry;
use super::mechanism::{ClimberConfig, FeederConfig, IntakeConfig, ShooterConfig};

/// Maximum number of motor controllers on the bus.
pub const MAX_DEVICES: usize = 16;

/// Maximum number of remote sensors on the bus.
pub const MAX_SENSORS: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    /// Named motor controllers.
    pub devices: FnvIndexMap<String<32>, DeviceEntry, MAX_DEVICES>,

    /// Named remote sensors and their bus ids.
    #[serde(default)]
    pub sensors: FnvIndexMap<String<32>, u8, MAX_SENSORS>,

    /// Shooter section.
    pub shooter: ShooterConfig,

    /// Intake section.
    pub intake: IntakeConfig,

    /// Feeder section.
    pub feeder: FeederConfig,

    /// Climber section.
    pub climber: ClimberConfig,
}

impl RobotConfig {
    /// Get a device entry by name.
    pub fn device(&self, name: &str) -> Option<&DeviceEntry> {
        self.devices
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a remote sensor id by name.
    pub fn sensor(&self, name: &str) -> Option<u8> {
        self.sensors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// List all device names.
    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(|s| s.as_str())
    }

    /// List all sensor names.
    pub fn sensor_names(&self) -> impl Iterator<Item = &str> {
        self.sensors.keys().map(|s| s.as_str())
    }

    /// Every device reference made by a mechanism, as `(role, device name)`.
    pub fn mechanism_roles(&self) -> Vec<(&'static str, &str), 8> {
        let mut roles = Vec::new();
        let _ = roles.push(("shooter.primary", self.shooter.primary.as_str()));
        if let Some(ref follower) = self.shooter.follower {
            let _ = roles.push(("shooter.follower", follower.as_str()));
        }
        let _ = roles.push(("shooter.hood", self.shooter.hood.as_str()));
        let _ = roles.push(("intake.roller", self.intake.roller.as_str()));
        let _ = roles.push(("intake.deploy", self.intake.deploy.as_str()));
        let _ = roles.push(("feeder.motor", self.feeder.motor.as_str()));
        let _ = roles.push(("climber.motor", self.climber.motor.as_str()));
        roles
    }
}
