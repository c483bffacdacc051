//! Feeder between intake and shooter.

use crate::config::Volts;
use crate::control::{Actuator, ControlModes};
use crate::device::Transport;
use crate::error::Result;

/// Feeder roller, run open loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Feeder {
    motor: Actuator,
}

impl Feeder {
    /// Create a feeder from a configured actuator.
    pub fn new(motor: Actuator) -> Self {
        Self { motor }
    }

    /// Feeder actuator.
    #[inline]
    pub fn motor(&self) -> &Actuator {
        &self.motor
    }

    /// Run the feeder.
    pub fn run<B: Transport>(&mut self, bus: &mut B, volts: Volts) -> Result<()> {
        self.motor.set_voltage(bus, volts)
    }

    /// Stop the feeder.
    pub fn stop<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.motor.neutral(bus)
    }
}
