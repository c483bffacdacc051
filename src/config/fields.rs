//! Configuration field groups.
//!
//! A device accepts or refuses configuration per group, so apply and readback
//! failures are reported as a set of groups rather than a single field.

use bitflags::bitflags;

bitflags! {
    /// Groups of a [`DeviceConfig`](super::DeviceConfig) that can be rejected
    /// or differ on readback.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConfigFields: u8 {
        /// Output inversion polarity.
        const INVERSION       = 0x01;
        /// Brake or coast when neutral.
        const NEUTRAL_MODE    = 0x02;
        /// Feedback source, remote sensor id and ratios.
        const FEEDBACK        = 0x04;
        /// Slot 0 closed-loop gains.
        const GAINS           = 0x08;
        /// Onboard motion profile limits.
        const MOTION_PROFILE  = 0x10;
        /// Hardware limit switch wiring.
        const HARDWARE_LIMITS = 0x20;
    }
}

impl Default for ConfigFields {
    fn default() -> Self {
        Self::empty()
    }
}
