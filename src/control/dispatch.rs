//! Control mode dispatch.
//!
//! [`ControlModes`] is the request surface shared by a single [`Device`] and
//! an [`Actuator`] with a follower. Implementors only provide
//! [`submit`](ControlModes::submit); the typed setters build the request.
//!
//! [`Device`]: crate::device::Device
//! [`Actuator`]: super::Actuator

use crate::config::{Rotations, RotationsPerSec, Volts};
use crate::device::Transport;
use crate::error::Result;

use super::request::ControlRequest;

/// Typed control requests for anything that drives a motor.
///
/// Every setter replaces the active request. A rejected request leaves the
/// previous one in force.
pub trait ControlModes {
    /// Check, send and record `request`.
    fn submit<B: Transport>(&mut self, bus: &mut B, request: ControlRequest) -> Result<()>;

    /// Check if hardware limits are enforced on this output.
    fn limits_wired(&self) -> bool;

    /// Open-loop voltage.
    fn set_voltage<B: Transport>(&mut self, bus: &mut B, volts: Volts) -> Result<()> {
        self.submit(bus, ControlRequest::Voltage(volts))
    }

    /// Closed-loop velocity.
    fn set_velocity<B: Transport>(&mut self, bus: &mut B, velocity: RotationsPerSec) -> Result<()> {
        self.submit(bus, ControlRequest::Velocity(velocity))
    }

    /// Closed-loop position, bounded by hardware limits when `bounded`.
    fn set_position<B: Transport>(
        &mut self,
        bus: &mut B,
        target: Rotations,
        bounded: bool,
    ) -> Result<()> {
        self.submit(bus, ControlRequest::Position { target, bounded })
    }

    /// Motion-profiled position, bounded whenever limits are wired.
    fn set_motion_profiled_position<B: Transport>(
        &mut self,
        bus: &mut B,
        target: Rotations,
    ) -> Result<()> {
        let bounded = self.limits_wired();
        self.submit(bus, ControlRequest::MotionProfiledPosition { target, bounded })
    }

    /// Motion-profiled velocity.
    fn set_motion_profiled_velocity<B: Transport>(
        &mut self,
        bus: &mut B,
        velocity: RotationsPerSec,
    ) -> Result<()> {
        self.submit(bus, ControlRequest::MotionProfiledVelocity(velocity))
    }

    /// Zero output; the device falls back to its neutral mode.
    fn neutral<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.set_voltage(bus, Volts::ZERO)
    }
}
