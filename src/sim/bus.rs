//! In-memory transport.

use heapless::Vec;

use crate::config::DeviceConfig;
use crate::control::ControlRequest;
use crate::device::{DeviceId, DeviceStatus, Transport};
use crate::error::BusError;

use super::device::SimDevice;

/// Maximum number of simulated devices on one bus.
pub const MAX_SIM_DEVICES: usize = 16;

/// Simulated bus carrying frames to [`SimDevice`]s.
///
/// Frames take effect immediately; motion happens only in [`SimBus::step`].
#[derive(Debug, Clone, Default)]
pub struct SimBus {
    devices: Vec<SimDevice, MAX_SIM_DEVICES>,
    frames_sent: u32,
}

impl SimBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus with a device at each id. Ids past capacity are dropped.
    pub fn with_devices(ids: &[u8]) -> Self {
        let mut bus = Self::new();
        for id in ids {
            bus.add_device(DeviceId(*id));
        }
        bus
    }

    /// Attach a device, returning the existing one if the id is taken.
    ///
    /// Returns `None` when the bus is full.
    pub fn add_device(&mut self, id: DeviceId) -> Option<&mut SimDevice> {
        if let Some(index) = self.index_of(id) {
            return self.devices.get_mut(index);
        }
        self.devices.push(SimDevice::new(id)).ok()?;
        self.devices.last_mut()
    }

    /// Get a device by id.
    pub fn device(&self, id: DeviceId) -> Option<&SimDevice> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Get a device by id, mutably.
    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut SimDevice> {
        self.devices.iter_mut().find(|d| d.id() == id)
    }

    /// Fail the next operation addressed to `id` with `fault`.
    pub fn inject_fault(&mut self, id: DeviceId, fault: BusError) {
        self.inject_fault_after(id, fault, 0);
    }

    /// Let `skip` operations addressed to `id` through, then fail the next
    /// one with `fault`.
    pub fn inject_fault_after(&mut self, id: DeviceId, fault: BusError, skip: u8) {
        if let Some(device) = self.device_mut(id) {
            device.inject_fault(fault, skip);
        }
    }

    /// Frames accepted by the bus (configuration and control).
    #[inline]
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Advance every device by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        for device in self.devices.iter_mut() {
            device.step(dt);
        }
    }

    fn index_of(&self, id: DeviceId) -> Option<usize> {
        self.devices.iter().position(|d| d.id() == id)
    }

    fn addressed(&mut self, id: DeviceId) -> Result<&mut SimDevice, BusError> {
        let device = self.device_mut(id).ok_or(BusError::UnknownDevice)?;
        device.take_fault()?;
        Ok(device)
    }
}

impl Transport for SimBus {
    fn apply_config(&mut self, id: DeviceId, config: &DeviceConfig) -> Result<(), BusError> {
        self.addressed(id)?.apply(config)?;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }

    fn read_config(&mut self, id: DeviceId) -> Result<DeviceConfig, BusError> {
        Ok(*self.addressed(id)?.config())
    }

    fn set_control(&mut self, id: DeviceId, request: &ControlRequest) -> Result<(), BusError> {
        self.addressed(id)?.command(*request);
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }

    fn status(&self, id: DeviceId) -> Option<DeviceStatus> {
        self.device(id).map(SimDevice::status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Volts;

    #[test]
    fn test_unknown_device() {
        let mut bus = SimBus::with_devices(&[1]);
        assert_eq!(
            bus.set_control(DeviceId(9), &ControlRequest::Voltage(Volts(1.0))),
            Err(BusError::UnknownDevice)
        );
        assert_eq!(bus.status(DeviceId(9)), None);
    }

    #[test]
    fn test_fault_is_one_shot() {
        let mut bus = SimBus::with_devices(&[1]);
        bus.inject_fault(DeviceId(1), BusError::Disconnected);
        let request = ControlRequest::Voltage(Volts(1.0));

        assert_eq!(bus.set_control(DeviceId(1), &request), Err(BusError::Disconnected));
        assert_eq!(bus.set_control(DeviceId(1), &request), Ok(()));
        assert_eq!(bus.frames_sent(), 1);
    }

    #[test]
    fn test_delayed_fault() {
        let mut bus = SimBus::with_devices(&[1]);
        bus.inject_fault_after(DeviceId(1), BusError::Timeout, 1);
        let request = ControlRequest::Voltage(Volts(1.0));

        assert_eq!(bus.set_control(DeviceId(1), &request), Ok(()));
        assert_eq!(bus.set_control(DeviceId(1), &request), Err(BusError::Timeout));
        assert_eq!(bus.set_control(DeviceId(1), &request), Ok(()));
    }

    #[test]
    fn test_duplicate_add_returns_existing() {
        let mut bus = SimBus::with_devices(&[1, 1, 2]);
        assert!(bus.add_device(DeviceId(2)).is_some());
        assert!(bus.device(DeviceId(1)).is_some());
        assert_eq!(bus.devices.len(), 2);
    }
}
