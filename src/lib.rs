//! # actuator-core
//!
//! Configuration-driven motor controller actuation for competition robot
//! mechanisms.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define devices and mechanisms in a TOML file
//! - **Verified configuration**: Every device is written once and read back
//! - **Control mode dispatch**: Voltage, velocity, position and motion-profiled requests
//! - **Followers**: Mirror a primary device, same-direction or opposed
//! - **Hardware limits**: Position requests on limit-wired axes stay bounded
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use actuator_core::{Robot, ShotPoint, Volts};
//!
//! // Load configuration from TOML
//! let config = actuator_core::load_config("robot.toml")?;
//!
//! // Configure every device over the bus and build the mechanisms
//! let mut robot = Robot::initialize(&mut bus, &config, forward_pin, reverse_pin)?;
//!
//! // One call per mechanism operation
//! robot.shooter.select_operating_point(&mut bus, ShotPoint::Mid)?;
//! robot.feeder.run(&mut bus, Volts(6.0))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod control;
pub mod device;
pub mod error;
pub mod mechanism;
pub mod sim;

// Re-exports for ergonomic API
pub use config::{validate_config, DeviceConfig, DeviceConfigBuilder, RobotConfig};
pub use control::{Actuator, ControlModes, ControlRequest, FollowerLink, LimitState, LimitedAxis, Orientation};
pub use device::{configure, Applied, Device, DeviceId, DeviceStatus, Readiness, Role, Transport};
pub use error::{BusError, ConfigError, DeviceError, Error, Result};
pub use mechanism::{
    Climber, Feeder, Intake, OperatingPointPolicy, OperatingPoints, Robot, Setpoint, Shooter,
    ShotPoint,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Rotations, RotationsPerSec, RotationsPerSecSquared, UnitExt, Volts};
