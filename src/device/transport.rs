//! Bus transport seam.
//!
//! A [`Transport`] carries configuration and control frames to motor
//! controllers addressed by [`DeviceId`]. Implementations wrap the real CAN
//! interface or, in tests, [`SimBus`](crate::sim::SimBus).

use core::fmt;

use crate::config::{DeviceConfig, Rotations, RotationsPerSec};
use crate::control::ControlRequest;
use crate::error::BusError;

/// Bus identifier of a motor controller or sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub u8);

impl DeviceId {
    /// Get the raw identifier.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Latest status frame received from a device.
///
/// Values are whatever the device last broadcast, typically one control cycle
/// old. Readers must not expect them to be in step with the last request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceStatus {
    /// Measured position from the configured feedback source.
    pub position: Rotations,
    /// Measured velocity from the configured feedback source.
    pub velocity: RotationsPerSec,
    /// Forward limit input as seen by the device.
    pub forward_limit: bool,
    /// Reverse limit input as seen by the device.
    pub reverse_limit: bool,
}

/// Request/response channel to motor controllers.
///
/// No method may block. A transport whose transmit queue is full returns
/// [`BusError::WouldBlock`] instead of waiting.
pub trait Transport {
    /// Send a configuration descriptor to a device.
    fn apply_config(&mut self, id: DeviceId, config: &DeviceConfig) -> Result<(), BusError>;

    /// Read back the configuration a device currently holds.
    fn read_config(&mut self, id: DeviceId) -> Result<DeviceConfig, BusError>;

    /// Replace the device's active control request.
    fn set_control(&mut self, id: DeviceId, request: &ControlRequest) -> Result<(), BusError>;

    /// Latest status frame from a device, if one has been received.
    fn status(&self, id: DeviceId) -> Option<DeviceStatus>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn apply_config(&mut self, id: DeviceId, config: &DeviceConfig) -> Result<(), BusError> {
        (**self).apply_config(id, config)
    }

    fn read_config(&mut self, id: DeviceId) -> Result<DeviceConfig, BusError> {
        (**self).read_config(id)
    }

    fn set_control(&mut self, id: DeviceId, request: &ControlRequest) -> Result<(), BusError> {
        (**self).set_control(id, request)
    }

    fn status(&self, id: DeviceId) -> Option<DeviceStatus> {
        (**self).status(id)
    }
}
