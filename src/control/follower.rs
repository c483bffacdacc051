//! Follower binding.
//!
//! A follower never takes independent requests. Whenever its primary is sent
//! a request, the follower is sent the same request, negated for an opposed
//! mounting. Both devices are checked before either frame goes out.

use crate::device::{Device, DeviceId, Role, Transport};
use crate::error::{ConfigError, Error, Result};

use super::request::{ControlRequest, Orientation};

/// A follower device bound to a primary.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerLink {
    follower: Device,
    primary: DeviceId,
    orientation: Orientation,
}

impl FollowerLink {
    /// Bind `follower` to `primary`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFollower`] if the follower is the primary itself,
    /// or either device is already a follower.
    pub fn bind(primary: &Device, mut follower: Device, orientation: Orientation) -> Result<Self> {
        if follower.id() == primary.id() || primary.is_follower() || follower.is_follower() {
            return Err(Error::Config(ConfigError::InvalidFollower(follower.id())));
        }

        follower.set_role(Role::Follower {
            primary: primary.id(),
            orientation,
        });
        debug!(
            "device {} follows {} ({})",
            follower.id().0,
            primary.id().0,
            orientation
        );

        Ok(Self {
            follower,
            primary: primary.id(),
            orientation,
        })
    }

    /// Request the follower receives when the primary receives `request`.
    #[inline]
    pub fn derive(&self, request: ControlRequest) -> ControlRequest {
        self.orientation.apply(request)
    }

    /// The bound follower.
    #[inline]
    pub fn follower(&self) -> &Device {
        &self.follower
    }

    /// The bound follower, mutably. Requests sent to it directly are refused.
    #[inline]
    pub fn follower_mut(&mut self) -> &mut Device {
        &mut self.follower
    }

    /// Primary this follower mirrors.
    #[inline]
    pub fn primary(&self) -> DeviceId {
        self.primary
    }

    /// Mounting relative to the primary.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Release the follower as an independent device.
    pub fn unbind(mut self) -> Device {
        self.follower.set_role(Role::Independent);
        self.follower
    }

    pub(crate) fn preflight(&self, request: &ControlRequest) -> Result<()> {
        self.follower.preflight(&self.derive(*request))
    }

    pub(crate) fn mirror<B: Transport>(&mut self, bus: &mut B, request: ControlRequest) -> Result<()> {
        let derived = self.derive(request);
        self.follower.transmit(bus, derived)
    }

    /// Restore the follower to the derived form of the primary's restored
    /// request.
    pub(crate) fn restore<B: Transport>(
        &mut self,
        bus: &mut B,
        previous: Option<ControlRequest>,
    ) -> Result<()> {
        let derived = previous.map(|r| self.derive(r));
        self.follower.restore(bus, derived)
    }
}
