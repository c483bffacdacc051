//! Simulated motor controller.

use crate::config::{
    ConfigFields, DeviceConfig, FeedbackConfig, Inversion, NeutralMode, Rotations,
    RotationsPerSec, SlotGains,
};
use crate::control::ControlRequest;
use crate::device::{DeviceId, DeviceStatus};
use crate::error::BusError;

use super::profile::{MotionPhase, TrapezoidProfile};

/// Mechanism speed at full duty cycle (rotations/second).
pub const FREE_SPEED: f32 = 100.0;

/// Configuration a device holds before anything is applied.
pub const FACTORY_CONFIG: DeviceConfig = DeviceConfig {
    inverted: Inversion::CounterClockwisePositive,
    neutral_mode: NeutralMode::Coast,
    feedback: FeedbackConfig {
        source: crate::config::FeedbackSource::RotorSensor,
        remote_sensor_id: None,
        rotor_to_sensor_ratio: 1.0,
        sensor_to_mechanism_ratio: 1.0,
    },
    slot0: SlotGains::OPEN_LOOP,
    motion_profile: None,
    hardware_limits: None,
};

/// In-memory motor controller with a kinematic plant.
#[derive(Debug, Clone, PartialEq)]
pub struct SimDevice {
    id: DeviceId,
    config: DeviceConfig,
    request: Option<ControlRequest>,
    position: f32,
    velocity: f32,
    forward_asserted: bool,
    reverse_asserted: bool,
    travel: Option<(f32, f32)>,
    rejected: ConfigFields,
    ignore_writes: bool,
    fault: Option<BusError>,
    fault_skip: u8,
}

impl SimDevice {
    /// Create a device at rest at position zero with factory configuration.
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            config: FACTORY_CONFIG,
            request: None,
            position: 0.0,
            velocity: 0.0,
            forward_asserted: false,
            reverse_asserted: false,
            travel: None,
            rejected: ConfigFields::empty(),
            ignore_writes: false,
            fault: None,
            fault_skip: 0,
        }
    }

    /// Get the bus identifier.
    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Configuration the device currently holds.
    #[inline]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Active control request.
    #[inline]
    pub fn request(&self) -> Option<ControlRequest> {
        self.request
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Rotations {
        Rotations(self.position)
    }

    /// Current velocity.
    #[inline]
    pub fn velocity(&self) -> RotationsPerSec {
        RotationsPerSec(self.velocity)
    }

    /// Forward and reverse limit inputs, as asserted.
    #[inline]
    pub fn limits(&self) -> (bool, bool) {
        (self.forward_asserted, self.reverse_asserted)
    }

    /// Move the mechanism to `position` without simulating the motion.
    pub fn set_position(&mut self, position: Rotations) {
        self.position = position.0;
        self.update_travel_inputs();
    }

    /// Force the limit inputs.
    pub fn set_limits(&mut self, forward: bool, reverse: bool) {
        self.forward_asserted = forward;
        self.reverse_asserted = reverse;
    }

    /// Put hard stops with limit switches at both ends of travel.
    pub fn set_travel(&mut self, reverse: Rotations, forward: Rotations) {
        self.travel = Some((reverse.0, forward.0));
        self.update_travel_inputs();
    }

    /// Refuse any configuration that touches these field groups.
    pub fn set_rejected_fields(&mut self, fields: ConfigFields) {
        self.rejected = fields;
    }

    /// Acknowledge configuration writes without storing them.
    pub fn set_ignore_writes(&mut self, ignore: bool) {
        self.ignore_writes = ignore;
    }

    /// Status frame as the device would broadcast it.
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus {
            position: self.position(),
            velocity: self.velocity(),
            forward_limit: self.forward_asserted,
            reverse_limit: self.reverse_asserted,
        }
    }

    /// Profile phase of an active motion-profiled position request.
    pub fn phase(&self) -> Option<MotionPhase> {
        match (self.request, self.config.motion_profile.as_ref()) {
            (Some(ControlRequest::MotionProfiledPosition { target, .. }), Some(profile)) => {
                Some(TrapezoidProfile::from(profile).phase(self.position, self.velocity, target.0))
            }
            _ => None,
        }
    }

    pub(crate) fn inject_fault(&mut self, fault: BusError, skip: u8) {
        self.fault = Some(fault);
        self.fault_skip = skip;
    }

    pub(crate) fn take_fault(&mut self) -> Result<(), BusError> {
        if self.fault.is_some() && self.fault_skip > 0 {
            self.fault_skip -= 1;
            return Ok(());
        }
        match self.fault.take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(&mut self, config: &DeviceConfig) -> Result<(), BusError> {
        if !self.rejected.is_empty() {
            return Err(BusError::Rejected(self.rejected));
        }
        if !self.ignore_writes {
            self.config = *config;
        }
        Ok(())
    }

    pub(crate) fn command(&mut self, request: ControlRequest) {
        self.request = Some(request);
    }

    /// Advance the plant by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let profile = self.config.motion_profile.as_ref().map(TrapezoidProfile::from);

        let desired = match self.request {
            None => 0.0,
            Some(ControlRequest::Voltage(volts)) => volts.duty_cycle() * FREE_SPEED,
            Some(ControlRequest::Velocity(velocity)) => velocity.0.clamp(-FREE_SPEED, FREE_SPEED),
            Some(ControlRequest::Position { target, .. }) => {
                if dt > 0.0 {
                    ((target.0 - self.position) / dt).clamp(-FREE_SPEED, FREE_SPEED)
                } else {
                    0.0
                }
            }
            Some(ControlRequest::MotionProfiledPosition { target, .. }) => match profile {
                Some(p) => p.next_velocity(self.position, self.velocity, target.0, dt),
                None => 0.0,
            },
            Some(ControlRequest::MotionProfiledVelocity(velocity)) => match profile {
                Some(p) => p.ramp_velocity(self.velocity, velocity.0, dt),
                None => 0.0,
            },
        };

        self.velocity = self.limit(desired);
        self.position += self.velocity * dt;
        self.update_travel_inputs();
    }

    /// Zero any motion the enabled hardware limits refuse.
    fn limit(&self, velocity: f32) -> f32 {
        let respects = self.request.map_or(true, |r| r.respects_limits());
        let Some(limits) = self.config.enforced_limits() else {
            return velocity;
        };
        if !respects {
            return velocity;
        }

        if limits.forward.enabled && self.forward_asserted && velocity > 0.0 {
            return 0.0;
        }
        if limits.reverse.enabled && self.reverse_asserted && velocity < 0.0 {
            return 0.0;
        }
        velocity
    }

    fn update_travel_inputs(&mut self) {
        let Some((reverse, forward)) = self.travel else {
            return;
        };

        if self.position >= forward {
            self.position = forward;
            self.velocity = self.velocity.min(0.0);
        }
        if self.position <= reverse {
            self.position = reverse;
            self.velocity = self.velocity.max(0.0);
        }
        self.forward_asserted = self.position >= forward;
        self.reverse_asserted = self.position <= reverse;
    }
}
