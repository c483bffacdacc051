//! Hardware limit switch wiring.
//!
//! The switches are wired into the device's own limiting logic, so motion past
//! an asserted limit is refused on the device even if this software stops
//! running.

use serde::Deserialize;

/// Electrical behavior of a limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum SwitchPolarity {
    /// Contact closes when the axis reaches the stop; input reads low when asserted.
    #[default]
    NormallyOpen,
    /// Contact opens when the axis reaches the stop; input reads high when asserted.
    NormallyClosed,
}

impl SwitchPolarity {
    /// Decode a raw input level into asserted/not-asserted.
    #[inline]
    pub fn is_asserted(self, input_high: bool) -> bool {
        match self {
            SwitchPolarity::NormallyOpen => !input_high,
            SwitchPolarity::NormallyClosed => input_high,
        }
    }
}

/// One limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LimitSwitchConfig {
    /// Digital input channel the switch is wired to.
    pub channel: u8,

    /// Whether the device enforces this limit.
    pub enabled: bool,

    /// Switch polarity.
    #[serde(default)]
    pub polarity: SwitchPolarity,
}

impl LimitSwitchConfig {
    /// An enabled, normally-open switch on `channel`.
    pub const fn enabled(channel: u8) -> Self {
        Self {
            channel,
            enabled: true,
            polarity: SwitchPolarity::NormallyOpen,
        }
    }
}

/// Forward and reverse hardware limit wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HardwareLimitConfig {
    /// Switch at the positive end of travel.
    pub forward: LimitSwitchConfig,
    /// Switch at the negative end of travel.
    pub reverse: LimitSwitchConfig,
}

impl HardwareLimitConfig {
    /// Enabled normally-open switches on the given channels.
    pub const fn new(forward_channel: u8, reverse_channel: u8) -> Self {
        Self {
            forward: LimitSwitchConfig::enabled(forward_channel),
            reverse: LimitSwitchConfig::enabled(reverse_channel),
        }
    }

    /// Check if both ends are enforced.
    pub fn is_fully_enabled(&self) -> bool {
        self.forward.enabled && self.reverse.enabled
    }

    /// Check if either end is enforced.
    pub fn any_enabled(&self) -> bool {
        self.forward.enabled || self.reverse.enabled
    }

    /// Check if the wiring is valid (enabled switches on distinct channels).
    pub fn is_valid(&self) -> bool {
        !(self.forward.enabled && self.reverse.enabled && self.forward.channel == self.reverse.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_decoding() {
        assert!(SwitchPolarity::NormallyOpen.is_asserted(false));
        assert!(!SwitchPolarity::NormallyOpen.is_asserted(true));
        assert!(SwitchPolarity::NormallyClosed.is_asserted(true));
        assert!(!SwitchPolarity::NormallyClosed.is_asserted(false));
    }

    #[test]
    fn test_shared_channel_invalid() {
        let limits = HardwareLimitConfig::new(0, 0);
        assert!(!limits.is_valid());
        assert!(HardwareLimitConfig::new(0, 1).is_valid());
    }

    #[test]
    fn test_partially_enabled() {
        let mut limits = HardwareLimitConfig::new(0, 1);
        limits.reverse.enabled = false;
        assert!(!limits.is_fully_enabled());
        assert!(limits.any_enabled());
    }
}
