//! Configuration module for actuator-core.
//!
//! Provides the per-device configuration descriptor, the robot-level
//! configuration that maps names to bus ids and mechanisms, and loading and
//! validation from TOML files (with `std` feature) or pre-parsed data.

mod builder;
mod device;
mod feedback;
mod fields;
mod gains;
mod limits;
mod mechanism;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use builder::DeviceConfigBuilder;
pub use device::{DeviceConfig, DeviceEntry, Inversion, NeutralMode};
pub use feedback::{FeedbackConfig, FeedbackSource};
pub use fields::ConfigFields;
pub use gains::{MotionProfileConfig, SlotGains};
pub use limits::{HardwareLimitConfig, LimitSwitchConfig, SwitchPolarity};
pub use mechanism::{ClimberConfig, FeederConfig, IntakeConfig, ShooterConfig};
pub use system::{RobotConfig, MAX_DEVICES, MAX_SENSORS};
pub use validation::{validate_config, validate_device};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Rotations, RotationsPerSec, RotationsPerSecSquared, UnitExt, Volts};
