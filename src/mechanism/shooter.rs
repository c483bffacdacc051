//! Dual-flywheel shooter with a hood.

use crate::config::{Rotations, RotationsPerSec};
use crate::control::{Actuator, ControlModes, ControlRequest};
use crate::device::Transport;
use crate::error::{DeviceError, Error, Result};

use super::operating_point::{OperatingPointPolicy, OperatingPoints, Setpoint, ShotPoint};

/// Shooter: a flywheel actuator (usually primary plus opposed follower) and a
/// hood position actuator, driven together through an operating point table.
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    flywheel: Actuator,
    hood: Actuator,
    points: OperatingPoints,
    active_point: Option<ShotPoint>,
}

impl Shooter {
    /// Create a shooter from configured actuators.
    pub fn new(flywheel: Actuator, hood: Actuator, points: OperatingPoints) -> Self {
        Self {
            flywheel,
            hood,
            points,
            active_point: None,
        }
    }

    /// Flywheel actuator.
    #[inline]
    pub fn flywheel(&self) -> &Actuator {
        &self.flywheel
    }

    /// Hood actuator.
    #[inline]
    pub fn hood(&self) -> &Actuator {
        &self.hood
    }

    /// Operating point table.
    #[inline]
    pub fn points(&self) -> &OperatingPoints {
        &self.points
    }

    /// Operating point last selected, cleared by any other flywheel request.
    #[inline]
    pub fn active_point(&self) -> Option<ShotPoint> {
        self.active_point
    }

    /// Spin the flywheels at an explicit velocity.
    pub fn set_velocity<B: Transport>(&mut self, bus: &mut B, velocity: RotationsPerSec) -> Result<()> {
        self.flywheel.set_velocity(bus, velocity)?;
        self.active_point = None;
        Ok(())
    }

    /// Move the hood to an explicit position.
    pub fn set_hood_position<B: Transport>(&mut self, bus: &mut B, position: Rotations) -> Result<()> {
        self.hood.set_position(bus, position, false)
    }

    /// Apply a named operating point as one update.
    ///
    /// Both actuators are checked before anything is sent. If the flywheel
    /// update then fails on the bus, the flywheel keeps its previous request
    /// and the hood is put back to its own.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::RollbackFailed`] when a restore frame is also
    /// lost; the shooter may then run the new setpoint.
    pub fn select_operating_point<B: Transport>(
        &mut self,
        bus: &mut B,
        point: ShotPoint,
    ) -> Result<Setpoint> {
        let setpoint = self.points.select(point);
        self.apply(bus, setpoint)?;
        self.active_point = Some(point);
        debug!("shooter at {}", point);
        Ok(setpoint)
    }

    /// Stop the flywheels. Always available regardless of prior state.
    pub fn stop<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        let setpoint = self.points.stopped();
        self.apply(bus, setpoint)?;
        self.active_point = None;
        Ok(())
    }

    fn apply<B: Transport>(&mut self, bus: &mut B, setpoint: Setpoint) -> Result<()> {
        let velocity = ControlRequest::Velocity(setpoint.velocity);
        let hood = setpoint.hood.map(|target| ControlRequest::Position {
            target,
            bounded: false,
        });

        self.flywheel.preflight(&velocity)?;
        let Some(hood) = hood else {
            return self.flywheel.submit(bus, velocity);
        };
        self.hood.preflight(&hood)?;

        let previous = self.hood.active_request();
        self.hood.submit(bus, hood)?;

        match self.flywheel.submit(bus, velocity) {
            Ok(()) => Ok(()),
            // Flywheel is on the new velocity; leave the hood with it
            Err(e @ Error::Device(DeviceError::RollbackFailed { .. })) => {
                error!("shooter flywheel could not be restored");
                Err(e)
            }
            Err(e) => {
                warn!("shooter flywheel update failed, restoring hood");
                self.hood.restore(bus, previous)?;
                Err(e)
            }
        }
    }
}
