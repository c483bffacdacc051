//! Primary device with an optional follower.

use crate::device::{Device, DeviceId, DeviceStatus, Transport};
use crate::error::Result;

use super::dispatch::ControlModes;
use super::follower::FollowerLink;
use super::request::{ControlRequest, Orientation};

/// One mechanism output: a primary device and, optionally, a follower
/// mirroring it.
///
/// Requests go to the primary; the follower receives the derived request in
/// the same call. If either device would refuse the request, nothing is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    primary: Device,
    follower: Option<FollowerLink>,
}

impl Actuator {
    /// Create an actuator driven by a single device.
    pub fn new(primary: Device) -> Self {
        Self {
            primary,
            follower: None,
        }
    }

    /// Create an actuator with `follower` bound to `primary`.
    ///
    /// # Errors
    ///
    /// Returns an error if the follower cannot be bound.
    pub fn with_follower(
        primary: Device,
        follower: Device,
        orientation: Orientation,
    ) -> Result<Self> {
        let link = FollowerLink::bind(&primary, follower, orientation)?;
        Ok(Self {
            primary,
            follower: Some(link),
        })
    }

    /// Get the primary's bus id.
    #[inline]
    pub fn id(&self) -> DeviceId {
        self.primary.id()
    }

    /// The primary device.
    #[inline]
    pub fn primary(&self) -> &Device {
        &self.primary
    }

    /// The follower binding, if any.
    #[inline]
    pub fn follower(&self) -> Option<&FollowerLink> {
        self.follower.as_ref()
    }

    /// The follower binding, mutably.
    #[inline]
    pub fn follower_mut(&mut self) -> Option<&mut FollowerLink> {
        self.follower.as_mut()
    }

    /// Check if every device in the actuator is ready.
    pub fn is_ready(&self) -> bool {
        self.primary.is_ready()
            && self
                .follower
                .as_ref()
                .map_or(true, |link| link.follower().is_ready())
    }

    /// Last request the primary accepted.
    #[inline]
    pub fn active_request(&self) -> Option<ControlRequest> {
        self.primary.active_request()
    }

    /// Latest status frame for the primary.
    pub fn status<B: Transport>(&self, bus: &B) -> Option<DeviceStatus> {
        self.primary.status(bus)
    }

    /// Remove the follower and return it as an independent device.
    pub fn unbind_follower(&mut self) -> Option<Device> {
        self.follower.take().map(FollowerLink::unbind)
    }

    /// Split into the primary and the bound follower, if any.
    pub fn into_parts(self) -> (Device, Option<FollowerLink>) {
        (self.primary, self.follower)
    }

    /// Put both devices back on `previous`, or neutral.
    pub(crate) fn restore<B: Transport>(
        &mut self,
        bus: &mut B,
        previous: Option<ControlRequest>,
    ) -> Result<()> {
        self.primary.restore(bus, previous)?;
        match self.follower {
            Some(ref mut link) => link.restore(bus, previous),
            None => Ok(()),
        }
    }

    pub(crate) fn preflight(&self, request: &ControlRequest) -> Result<()> {
        self.primary.check_direct()?;
        self.primary.preflight(request)?;
        if let Some(ref link) = self.follower {
            link.preflight(request)?;
        }
        Ok(())
    }
}

impl ControlModes for Actuator {
    /// Send `request` to the primary and its derived form to the follower.
    ///
    /// If the follower frame fails, the primary is put back on its previous
    /// request (neutral if it had none) before the error is returned, so the
    /// pair never runs split. A failed restore is reported as
    /// [`DeviceError::RollbackFailed`](crate::error::DeviceError::RollbackFailed).
    fn submit<B: Transport>(&mut self, bus: &mut B, request: ControlRequest) -> Result<()> {
        self.preflight(&request)?;
        let previous = self.primary.active_request();
        self.primary.transmit(bus, request)?;

        if let Some(ref mut link) = self.follower {
            if let Err(e) = link.mirror(bus, request) {
                warn!("follower {} missed update, restoring primary", link.follower().id().0);
                self.primary.restore(bus, previous)?;
                return Err(e);
            }
        }
        Ok(())
    }

    fn limits_wired(&self) -> bool {
        self.primary.limits_wired()
    }
}
