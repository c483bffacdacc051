//! Motor controller configuration descriptor.

use serde::Deserialize;

use super::feedback::FeedbackConfig;
use super::fields::ConfigFields;
use super::gains::{MotionProfileConfig, SlotGains};
use super::limits::HardwareLimitConfig;

/// Which rotor direction counts as positive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Inversion {
    /// Counter-clockwise rotation (facing the shaft) is positive.
    CounterClockwisePositive,
    /// Clockwise rotation (facing the shaft) is positive.
    ClockwisePositive,
}

/// Output behavior when the device is commanded to neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum NeutralMode {
    /// Windings open; the mechanism spins down freely.
    Coast,
    /// Windings shorted; the mechanism holds against back-driving.
    Brake,
}

/// Complete configuration for one motor controller.
///
/// Every field except the optional motion profile and limit wiring is
/// required when deserializing, so a device can never be applied with a
/// half-specified closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DeviceConfig {
    /// Output polarity. Velocity and position setpoints are signed in this frame.
    pub inverted: Inversion,

    /// Neutral behavior.
    pub neutral_mode: NeutralMode,

    /// Feedback sensor and ratios.
    pub feedback: FeedbackConfig,

    /// Closed-loop gains.
    pub slot0: SlotGains,

    /// Onboard motion profile limits (required for motion-profiled requests).
    #[serde(default)]
    pub motion_profile: Option<MotionProfileConfig>,

    /// Hardware limit switch wiring.
    #[serde(default)]
    pub hardware_limits: Option<HardwareLimitConfig>,
}

impl DeviceConfig {
    /// Field groups in which `other` differs from `self`.
    pub fn mismatched_fields(&self, other: &DeviceConfig) -> ConfigFields {
        let mut fields = ConfigFields::empty();
        fields.set(ConfigFields::INVERSION, self.inverted != other.inverted);
        fields.set(ConfigFields::NEUTRAL_MODE, self.neutral_mode != other.neutral_mode);
        fields.set(ConfigFields::FEEDBACK, self.feedback != other.feedback);
        fields.set(ConfigFields::GAINS, self.slot0 != other.slot0);
        fields.set(
            ConfigFields::MOTION_PROFILE,
            self.motion_profile != other.motion_profile,
        );
        fields.set(
            ConfigFields::HARDWARE_LIMITS,
            self.hardware_limits != other.hardware_limits,
        );
        fields
    }

    /// Hardware limits with at least one end enforced.
    pub fn enforced_limits(&self) -> Option<&HardwareLimitConfig> {
        self.hardware_limits.as_ref().filter(|l| l.any_enabled())
    }
}

/// A device as declared in the robot configuration: bus id plus descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    /// Bus identifier.
    pub id: u8,

    /// Configuration applied at initialization.
    pub config: DeviceConfig,
}
