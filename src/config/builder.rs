//! Builder pattern for DeviceConfig.

use crate::error::{ConfigError, Error, Result};

use super::device::{DeviceConfig, Inversion, NeutralMode};
use super::feedback::FeedbackConfig;
use super::gains::{MotionProfileConfig, SlotGains};
use super::limits::HardwareLimitConfig;

/// Builder for creating [`DeviceConfig`] values in code.
///
/// Required parts have no defaults; [`build`](Self::build) fails naming the
/// first one left unset.
#[derive(Debug, Clone, Default)]
pub struct DeviceConfigBuilder {
    inverted: Option<Inversion>,
    neutral_mode: Option<NeutralMode>,
    feedback: Option<FeedbackConfig>,
    slot0: Option<SlotGains>,
    motion_profile: Option<MotionProfileConfig>,
    hardware_limits: Option<HardwareLimitConfig>,
}

impl DeviceConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output inversion.
    pub fn inverted(mut self, inverted: Inversion) -> Self {
        self.inverted = Some(inverted);
        self
    }

    /// Set neutral behavior.
    pub fn neutral_mode(mut self, mode: NeutralMode) -> Self {
        self.neutral_mode = Some(mode);
        self
    }

    /// Set feedback source and ratios.
    pub fn feedback(mut self, feedback: FeedbackConfig) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Set closed-loop gains.
    pub fn gains(mut self, gains: SlotGains) -> Self {
        self.slot0 = Some(gains);
        self
    }

    /// Set onboard motion profile limits.
    pub fn motion_profile(mut self, profile: MotionProfileConfig) -> Self {
        self.motion_profile = Some(profile);
        self
    }

    /// Wire hardware limit switches.
    pub fn hardware_limits(mut self, limits: HardwareLimitConfig) -> Self {
        self.hardware_limits = Some(limits);
        self
    }

    /// Start from an existing configuration.
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self {
            inverted: Some(config.inverted),
            neutral_mode: Some(config.neutral_mode),
            feedback: Some(config.feedback),
            slot0: Some(config.slot0),
            motion_profile: config.motion_profile,
            hardware_limits: config.hardware_limits,
        }
    }

    /// Build the DeviceConfig.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if a required part is unset.
    pub fn build(self) -> Result<DeviceConfig> {
        let inverted = self
            .inverted
            .ok_or(Error::Config(ConfigError::MissingField("inverted")))?;
        let neutral_mode = self
            .neutral_mode
            .ok_or(Error::Config(ConfigError::MissingField("neutral_mode")))?;
        let feedback = self
            .feedback
            .ok_or(Error::Config(ConfigError::MissingField("feedback")))?;
        let slot0 = self
            .slot0
            .ok_or(Error::Config(ConfigError::MissingField("slot0")))?;

        Ok(DeviceConfig {
            inverted,
            neutral_mode,
            feedback,
            slot0,
            motion_profile: self.motion_profile,
            hardware_limits: self.hardware_limits,
        })
    }
}
