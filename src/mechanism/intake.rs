//! Ground intake: roller plus a limit-bounded deploy arm.

use embedded_hal::digital::InputPin;

use crate::config::{Rotations, RotationsPerSec, Volts};
use crate::control::{Actuator, ControlModes, LimitState, LimitedAxis};
use crate::device::Transport;
use crate::error::Result;

/// Intake mechanism.
pub struct Intake<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    roller: Actuator,
    deploy: LimitedAxis<FWD, REV>,
}

impl<FWD, REV> Intake<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    /// Create an intake from a configured roller and deploy axis.
    pub fn new(roller: Actuator, deploy: LimitedAxis<FWD, REV>) -> Self {
        Self { roller, deploy }
    }

    /// Roller actuator.
    #[inline]
    pub fn roller(&self) -> &Actuator {
        &self.roller
    }

    /// Deploy axis.
    #[inline]
    pub fn deploy(&self) -> &LimitedAxis<FWD, REV> {
        &self.deploy
    }

    /// Deploy the arm to `position` through the motion profile.
    ///
    /// The arm stops at the forward limit if `position` lies past it.
    pub fn extend_arm<B: Transport>(&mut self, bus: &mut B, position: Rotations) -> Result<()> {
        self.deploy.set_motion_profiled_position(bus, position)
    }

    /// Pull the arm back to its home position.
    pub fn retract_arm<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.deploy.set_motion_profiled_position(bus, Rotations(0.0))
    }

    /// Hold the arm at `position` with the plain closed loop.
    pub fn set_arm_position<B: Transport>(&mut self, bus: &mut B, position: Rotations) -> Result<()> {
        self.deploy.set_position(bus, position)
    }

    /// Run the roller open loop.
    pub fn run_roller<B: Transport>(&mut self, bus: &mut B, volts: Volts) -> Result<()> {
        self.roller.set_voltage(bus, volts)
    }

    /// Run the roller at a profiled velocity.
    pub fn run_roller_velocity<B: Transport>(
        &mut self,
        bus: &mut B,
        velocity: RotationsPerSec,
    ) -> Result<()> {
        self.roller.set_motion_profiled_velocity(bus, velocity)
    }

    /// Stop the roller.
    pub fn stop_roller<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.roller.neutral(bus)
    }

    /// Read the deploy arm limit switches.
    pub fn arm_limit_state(&mut self) -> Result<LimitState> {
        self.deploy.limit_state()
    }

    /// Latest deploy arm position from its absolute sensor.
    pub fn arm_position<B: Transport>(&self, bus: &B) -> Option<Rotations> {
        self.deploy.position(bus)
    }

    /// Split into the roller and deploy axis.
    pub fn release(self) -> (Actuator, LimitedAxis<FWD, REV>) {
        (self.roller, self.deploy)
    }
}
