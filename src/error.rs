//! Error types for actuator-core.
//!
//! Provides unified error handling across configuration, device readiness and
//! request dispatch. Hardware limit clipping is expected steady-state behavior
//! and has no error variant.

use core::fmt;

use crate::config::ConfigFields;
use crate::device::DeviceId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all actuator-core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing, validation or apply error
    Config(ConfigError),
    /// Device readiness, dispatch or transport error
    Device(DeviceError),
}

/// Configuration-related errors.
///
/// Apply failures are fatal to the device until it is reconfigured.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required configuration part was never set
    MissingField(&'static str),
    /// Device name not found in configuration
    DeviceNotFound(heapless::String<32>),
    /// Remote sensor name not found in configuration
    SensorNotFound(heapless::String<32>),
    /// Two devices or sensors share a bus identifier
    DuplicateDeviceId(u8),
    /// One device is claimed by more than one mechanism role
    DeviceReused(heapless::String<32>),
    /// Invalid gear ratio (must be finite and > 0)
    InvalidGearRatio(f32),
    /// Invalid closed-loop gain (must be finite and >= 0)
    InvalidGain {
        /// Gain name
        gain: &'static str,
        /// Rejected value
        value: f32,
    },
    /// Invalid motion profile rate (must be finite and > 0)
    InvalidMotionProfile {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: f32,
    },
    /// Forward and reverse limit switches wired to the same channel
    DuplicateLimitChannel(u8),
    /// Remote or fused feedback without a remote sensor id
    MissingRemoteSensor(heapless::String<32>),
    /// Device must have both hardware limits enabled
    LimitWiringRequired(heapless::String<32>),
    /// Device feedback does not come from the expected remote sensor
    FeedbackMismatch {
        /// Device name
        device: heapless::String<32>,
        /// Expected remote sensor id
        expected: u8,
    },
    /// Follower cannot follow itself or another follower
    InvalidFollower(DeviceId),
    /// Device refused one or more configuration fields
    Rejected {
        /// Target device
        device: DeviceId,
        /// Fields the device refused
        fields: ConfigFields,
    },
    /// Readback after apply did not match the requested configuration
    ReadbackMismatch {
        /// Target device
        device: DeviceId,
        /// Fields that differ on the device
        fields: ConfigFields,
    },
    /// Bus failure while applying or reading back
    Bus {
        /// Target device
        device: DeviceId,
        /// Underlying transport failure
        cause: BusError,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Device dispatch errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// Request attempted before a successful configuration
    Unready(DeviceId),
    /// Bus failure submitting a request; retry next cycle
    Transport {
        /// Target device
        device: DeviceId,
        /// Underlying transport failure
        cause: BusError,
    },
    /// Independent request issued to a bound follower
    FollowerMisuse {
        /// Follower that received the request
        follower: DeviceId,
        /// Primary the follower is bound to
        primary: DeviceId,
    },
    /// Request needs configuration the device does not carry
    Unsupported {
        /// Target device
        device: DeviceId,
        /// What is missing
        reason: &'static str,
    },
    /// Forward and reverse limit inputs asserted together
    LimitConflict(DeviceId),
    /// Limit input pin could not be read
    LimitInput(DeviceId),
    /// A multi-frame update failed and restoring the previous request also
    /// failed; the device may still run the partial update
    RollbackFailed {
        /// Device that could not be restored
        device: DeviceId,
        /// Transport failure on the restore frame
        cause: BusError,
    },
}

/// Transport-level failures reported by a [`Transport`](crate::device::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// No acknowledgement within the transport deadline
    Timeout,
    /// Transmit queue full; the frame was not sent
    WouldBlock,
    /// Device refused the listed configuration fields
    Rejected(ConfigFields),
    /// No device answers at this identifier
    UnknownDevice,
    /// Bus is down
    Disconnected,
}

impl ConfigError {
    /// Configuration fields implicated by this error.
    ///
    /// Bus failures implicate every field since nothing is known to have
    /// landed on the device.
    pub fn fields(&self) -> ConfigFields {
        match self {
            ConfigError::Rejected { fields, .. } | ConfigError::ReadbackMismatch { fields, .. } => {
                *fields
            }
            ConfigError::Bus {
                cause: BusError::Rejected(fields),
                ..
            } => *fields,
            ConfigError::Bus { .. } => ConfigFields::all(),
            ConfigError::InvalidGearRatio(_)
            | ConfigError::MissingRemoteSensor(_)
            | ConfigError::FeedbackMismatch { .. } => ConfigFields::FEEDBACK,
            ConfigError::InvalidGain { .. } => ConfigFields::GAINS,
            ConfigError::InvalidMotionProfile { .. } => ConfigFields::MOTION_PROFILE,
            ConfigError::DuplicateLimitChannel(_) | ConfigError::LimitWiringRequired(_) => {
                ConfigFields::HARDWARE_LIMITS
            }
            _ => ConfigFields::empty(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Device(e) => write!(f, "Device error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ConfigError::DeviceNotFound(name) => write!(f, "Device '{}' not found", name),
            ConfigError::SensorNotFound(name) => write!(f, "Sensor '{}' not found", name),
            ConfigError::DuplicateDeviceId(id) => write!(f, "Duplicate bus id: {}", id),
            ConfigError::DeviceReused(name) => {
                write!(f, "Device '{}' is claimed by more than one mechanism", name)
            }
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidGain { gain, value } => {
                write!(f, "Invalid gain {}: {}. Must be finite and >= 0", gain, value)
            }
            ConfigError::InvalidMotionProfile { field, value } => {
                write!(f, "Invalid motion profile {}: {}. Must be > 0", field, value)
            }
            ConfigError::DuplicateLimitChannel(ch) => {
                write!(f, "Forward and reverse limits share channel {}", ch)
            }
            ConfigError::MissingRemoteSensor(name) => {
                write!(f, "Device '{}' uses remote feedback without a sensor id", name)
            }
            ConfigError::LimitWiringRequired(name) => {
                write!(f, "Device '{}' needs both hardware limits enabled", name)
            }
            ConfigError::FeedbackMismatch { device, expected } => {
                write!(f, "Device '{}' must take feedback from sensor {}", device, expected)
            }
            ConfigError::InvalidFollower(id) => write!(f, "Device {} cannot be bound as a follower", id),
            ConfigError::Rejected { device, fields } => {
                write!(f, "Device {} rejected {:?}", device, fields)
            }
            ConfigError::ReadbackMismatch { device, fields } => {
                write!(f, "Device {} readback differs in {:?}", device, fields)
            }
            ConfigError::Bus { device, cause } => {
                write!(f, "Bus error configuring device {}: {}", device, cause)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Unready(id) => write!(f, "Device {} is not configured", id),
            DeviceError::Transport { device, cause } => {
                write!(f, "Request to device {} failed: {}", device, cause)
            }
            DeviceError::FollowerMisuse { follower, primary } => write!(
                f,
                "Device {} follows device {} and cannot take direct requests",
                follower, primary
            ),
            DeviceError::Unsupported { device, reason } => {
                write!(f, "Device {} cannot run request: {}", device, reason)
            }
            DeviceError::LimitConflict(id) => {
                write!(f, "Device {} reports both limits asserted", id)
            }
            DeviceError::LimitInput(id) => write!(f, "Limit input for device {} unreadable", id),
            DeviceError::RollbackFailed { device, cause } => write!(
                f,
                "Device {} could not be restored after a failed update: {}",
                device, cause
            ),
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Timeout => write!(f, "timed out"),
            BusError::WouldBlock => write!(f, "transmit queue full"),
            BusError::Rejected(fields) => write!(f, "rejected {:?}", fields),
            BusError::UnknownDevice => write!(f, "no device at id"),
            BusError::Disconnected => write!(f, "bus disconnected"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Error::Device(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DeviceError {}

#[cfg(feature = "std")]
impl std::error::Error for BusError {}
