//! Device readiness and role.

use crate::config::ConfigFields;
use crate::control::Orientation;

use super::transport::DeviceId;

/// Whether a device may accept control requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// No configuration applied yet.
    #[default]
    Unconfigured,
    /// Configuration applied and verified.
    Ready,
    /// Last configuration attempt failed on the listed fields.
    Faulted(ConfigFields),
}

impl Readiness {
    /// Check if requests may be sent.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }

    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            Readiness::Unconfigured => "Unconfigured",
            Readiness::Ready => "Ready",
            Readiness::Faulted(_) => "Faulted",
        }
    }
}

/// Who decides a device's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Takes requests directly.
    #[default]
    Independent,
    /// Mirrors another device's requests.
    Follower {
        /// Device being mirrored.
        primary: DeviceId,
        /// Mounting relative to the primary.
        orientation: Orientation,
    },
}

impl Role {
    /// Check if this is a follower role.
    #[inline]
    pub fn is_follower(self) -> bool {
        matches!(self, Role::Follower { .. })
    }
}
