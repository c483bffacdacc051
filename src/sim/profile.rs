//! Trapezoidal motion profile for the simulated onboard profiler.
//!
//! The profile is evaluated one tick at a time from the current state instead
//! of being planned up front, so a changed target takes effect on the next
//! tick the way it does on the device.

use libm::{copysignf, fabsf, sqrtf};

use crate::config::MotionProfileConfig;

/// Distance under which a position move counts as arrived.
const ARRIVAL_TOLERANCE: f32 = 1e-4;

/// Current phase of a profiled move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Speeding up toward cruise velocity.
    Accelerating,
    /// Moving at cruise velocity.
    Cruising,
    /// Slowing down to stop on target.
    Decelerating,
    /// At target and at rest.
    Complete,
}

/// Symmetric trapezoidal profile limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidProfile {
    /// Cruise velocity (rotations/second).
    pub cruise: f32,
    /// Acceleration and deceleration (rotations/second²).
    pub acceleration: f32,
}

impl TrapezoidProfile {
    /// Create a profile from cruise velocity and acceleration.
    pub fn new(cruise: f32, acceleration: f32) -> Self {
        Self {
            cruise: fabsf(cruise),
            acceleration: fabsf(acceleration),
        }
    }

    /// Velocity to hold over the next `dt` seconds of a move to `target`.
    pub fn next_velocity(&self, position: f32, velocity: f32, target: f32, dt: f32) -> f32 {
        let error = target - position;
        let distance = fabsf(error);
        if dt <= 0.0 || distance < ARRIVAL_TOLERANCE {
            return 0.0;
        }

        // Fastest speed that can still stop within the remaining distance
        let stopping = sqrtf(2.0 * self.acceleration * distance);
        let desired = copysignf(self.cruise.min(stopping), error);

        let step = self.acceleration * dt;
        let next = velocity + (desired - velocity).clamp(-step, step);

        // Land on target rather than stepping past it
        if fabsf(next * dt) >= distance && copysignf(1.0, next) == copysignf(1.0, error) {
            error / dt
        } else {
            next
        }
    }

    /// Velocity after ramping from `velocity` toward `target` for `dt` seconds.
    pub fn ramp_velocity(&self, velocity: f32, target: f32, dt: f32) -> f32 {
        let step = self.acceleration * dt;
        let target = target.clamp(-self.cruise, self.cruise);
        velocity + (target - velocity).clamp(-step, step)
    }

    /// Phase of a move to `target` from the given state.
    pub fn phase(&self, position: f32, velocity: f32, target: f32) -> MotionPhase {
        let distance = fabsf(target - position);
        let speed = fabsf(velocity);
        if distance < ARRIVAL_TOLERANCE && speed < ARRIVAL_TOLERANCE {
            MotionPhase::Complete
        } else if speed * speed >= 2.0 * self.acceleration * distance {
            MotionPhase::Decelerating
        } else if speed < self.cruise - ARRIVAL_TOLERANCE {
            MotionPhase::Accelerating
        } else {
            MotionPhase::Cruising
        }
    }

    /// Time for a rest-to-rest move over `distance` rotations.
    pub fn duration(&self, distance: f32) -> f32 {
        let distance = fabsf(distance);
        if distance == 0.0 || self.cruise <= 0.0 || self.acceleration <= 0.0 {
            return 0.0;
        }

        let ramp_time = self.cruise / self.acceleration;
        let ramp_distance = self.cruise * ramp_time;
        if ramp_distance >= distance {
            // Triangle: never reaches cruise
            2.0 * sqrtf(distance / self.acceleration)
        } else {
            2.0 * ramp_time + (distance - ramp_distance) / self.cruise
        }
    }
}

impl From<&MotionProfileConfig> for TrapezoidProfile {
    fn from(config: &MotionProfileConfig) -> Self {
        Self::new(config.cruise_velocity.0, config.acceleration.0)
    }
}
