//! Climber winch.

use crate::config::Rotations;
use crate::control::{Actuator, ControlModes};
use crate::device::Transport;
use crate::error::Result;

/// Climber winch on a position loop. It has no limit switches, so position
/// requests are unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Climber {
    motor: Actuator,
}

impl Climber {
    /// Create a climber from a configured actuator.
    pub fn new(motor: Actuator) -> Self {
        Self { motor }
    }

    /// Winch actuator.
    #[inline]
    pub fn motor(&self) -> &Actuator {
        &self.motor
    }

    /// Drive the winch to `position`.
    pub fn set_position<B: Transport>(&mut self, bus: &mut B, position: Rotations) -> Result<()> {
        self.motor.set_position(bus, position, false)
    }

    /// Release the winch to neutral. A brake-mode winch holds position.
    pub fn stop<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.motor.neutral(bus)
    }
}
