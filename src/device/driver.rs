//! Motor controller handle.
//!
//! A [`Device`] records what the robot code believes a controller is doing:
//! the configuration it verified, its role, and the last request it sent.
//! It owns no bus; every operation that talks to hardware takes the
//! [`Transport`] by `&mut`, so one control cycle is the single writer.

use crate::config::{DeviceConfig, Volts};
use crate::control::{ControlModes, ControlRequest};
use crate::error::{DeviceError, Error, Result};

use super::state::{Readiness, Role};
use super::transport::{DeviceId, DeviceStatus, Transport};

/// A motor controller on the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Bus identifier.
    id: DeviceId,

    /// Device name for logging/debugging.
    name: heapless::String<32>,

    /// Readiness gate for requests.
    readiness: Readiness,

    /// Independent or bound follower.
    role: Role,

    /// Configuration verified on the device.
    applied: Option<DeviceConfig>,

    /// Last request accepted by the transport. Kept across a failed
    /// reconfigure, since the hardware keeps running it.
    active: Option<ControlRequest>,
}

impl Device {
    /// Create an unconfigured device handle.
    ///
    /// Names longer than 32 bytes are truncated at a character boundary.
    pub fn new(id: DeviceId, name: &str) -> Self {
        Self {
            id,
            name: truncated(name),
            readiness: Readiness::Unconfigured,
            role: Role::Independent,
            applied: None,
            active: None,
        }
    }

    /// Get the bus identifier.
    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Get the device name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the readiness state.
    #[inline]
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Check if the device accepts requests.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Get the device role.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Check if the device is bound as a follower.
    #[inline]
    pub fn is_follower(&self) -> bool {
        self.role.is_follower()
    }

    /// Configuration verified on the device, if any.
    #[inline]
    pub fn applied_config(&self) -> Option<&DeviceConfig> {
        self.applied.as_ref()
    }

    /// Last request the device accepted.
    #[inline]
    pub fn active_request(&self) -> Option<ControlRequest> {
        self.active
    }

    /// Latest status frame for this device.
    pub fn status<B: Transport>(&self, bus: &B) -> Option<DeviceStatus> {
        bus.status(self.id)
    }

    pub(crate) fn mark_ready(&mut self, config: DeviceConfig) {
        self.applied = Some(config);
        self.readiness = Readiness::Ready;
    }

    pub(crate) fn mark_faulted(&mut self, fields: crate::config::ConfigFields) {
        self.applied = None;
        self.readiness = Readiness::Faulted(fields);
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Reject requests addressed to a bound follower.
    pub(crate) fn check_direct(&self) -> Result<()> {
        match self.role {
            Role::Follower { primary, .. } => Err(Error::Device(DeviceError::FollowerMisuse {
                follower: self.id,
                primary,
            })),
            Role::Independent => Ok(()),
        }
    }

    /// Check that this device can carry out `request` without sending it.
    pub(crate) fn preflight(&self, request: &ControlRequest) -> Result<()> {
        let config = match (self.readiness, self.applied.as_ref()) {
            (Readiness::Ready, Some(config)) => config,
            _ => return Err(Error::Device(DeviceError::Unready(self.id))),
        };

        if request.is_bounded() && config.enforced_limits().is_none() {
            return Err(self.unsupported("bounded request without limit wiring"));
        }
        if request.is_motion_profiled() && config.motion_profile.is_none() {
            return Err(self.unsupported("motion-profiled request without motion profile"));
        }

        Ok(())
    }

    /// Send `request` and record it as active once the transport accepts it.
    pub(crate) fn transmit<B: Transport>(
        &mut self,
        bus: &mut B,
        request: ControlRequest,
    ) -> Result<()> {
        if let Err(cause) = bus.set_control(self.id, &request) {
            warn!("device {} dropped {} request", self.id.0, request.mode_name());
            return Err(Error::Device(DeviceError::Transport {
                device: self.id,
                cause,
            }));
        }

        trace!("device {} <- {}", self.id.0, request.mode_name());
        self.active = Some(request);
        Ok(())
    }

    /// Put back `previous`, or neutral when nothing was running before.
    ///
    /// Skips preflight: the restored request already ran on this device.
    pub(crate) fn restore<B: Transport>(
        &mut self,
        bus: &mut B,
        previous: Option<ControlRequest>,
    ) -> Result<()> {
        let request = previous.unwrap_or(ControlRequest::Voltage(Volts::ZERO));
        if let Err(cause) = bus.set_control(self.id, &request) {
            error!("device {} could not be restored", self.id.0);
            return Err(Error::Device(DeviceError::RollbackFailed {
                device: self.id,
                cause,
            }));
        }

        debug!("device {} restored to {}", self.id.0, request.mode_name());
        self.active = Some(request);
        Ok(())
    }

    fn unsupported(&self, reason: &'static str) -> Error {
        Error::Device(DeviceError::Unsupported {
            device: self.id,
            reason,
        })
    }
}

fn truncated(name: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl ControlModes for Device {
    fn submit<B: Transport>(&mut self, bus: &mut B, request: ControlRequest) -> Result<()> {
        self.check_direct()?;
        self.preflight(&request)?;
        self.transmit(bus, request)
    }

    fn limits_wired(&self) -> bool {
        self.applied
            .as_ref()
            .and_then(|c| c.enforced_limits())
            .is_some()
    }
}
