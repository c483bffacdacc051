//! Closed-loop gains and onboard motion profile limits.

use serde::Deserialize;

use super::units::{RotationsPerSec, RotationsPerSecSquared};

/// Slot 0 closed-loop gains, run by the device's onboard controller.
///
/// Every gain is required; an unset gain would silently run the loop with
/// whatever the device last held.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SlotGains {
    /// Proportional gain (volts per rotation of error).
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Static friction feedforward (volts).
    pub ks: f32,
    /// Velocity feedforward (volts per rotation/second).
    pub kv: f32,
}

impl SlotGains {
    /// All-zero gains, for devices that only run open loop.
    pub const OPEN_LOOP: Self = Self {
        kp: 0.0,
        ki: 0.0,
        kd: 0.0,
        ks: 0.0,
        kv: 0.0,
    };

    /// Proportional-only gains.
    pub const fn proportional(kp: f32) -> Self {
        Self {
            kp,
            ki: 0.0,
            kd: 0.0,
            ks: 0.0,
            kv: 0.0,
        }
    }

    /// Named gains for validation and reporting.
    pub fn named(&self) -> [(&'static str, f32); 5] {
        [
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("ks", self.ks),
            ("kv", self.kv),
        ]
    }
}

/// Limits for the onboard motion profile generator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MotionProfileConfig {
    /// Cruise velocity.
    #[serde(rename = "cruise_velocity_rps")]
    pub cruise_velocity: RotationsPerSec,

    /// Acceleration and deceleration limit.
    #[serde(rename = "acceleration_rps2")]
    pub acceleration: RotationsPerSecSquared,

    /// Jerk limit in rotations per second cubed.
    #[serde(rename = "jerk_rps3")]
    pub jerk: f32,
}

impl MotionProfileConfig {
    /// Profile limits from raw cruise velocity, acceleration and jerk.
    pub const fn new(cruise_velocity: f32, acceleration: f32, jerk: f32) -> Self {
        Self {
            cruise_velocity: RotationsPerSec(cruise_velocity),
            acceleration: RotationsPerSecSquared(acceleration),
            jerk,
        }
    }
}
