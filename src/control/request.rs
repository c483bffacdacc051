//! Control requests.

use serde::Deserialize;

use crate::config::{Rotations, RotationsPerSec, Volts};

/// A single control request.
///
/// A device holds at most one active request; sending another replaces it.
/// Position targets are in mechanism rotations and velocities in mechanism
/// rotations per second, signed in the device's configured inversion frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRequest {
    /// Open-loop voltage.
    Voltage(Volts),
    /// Closed-loop position.
    Position {
        /// Target position.
        target: Rotations,
        /// Route through the hardware limits instead of overriding them.
        bounded: bool,
    },
    /// Closed-loop velocity.
    Velocity(RotationsPerSec),
    /// Position through the onboard motion profile.
    MotionProfiledPosition {
        /// Target position.
        target: Rotations,
        /// Route through the hardware limits instead of overriding them.
        bounded: bool,
    },
    /// Velocity through the onboard motion profile.
    MotionProfiledVelocity(RotationsPerSec),
}

impl ControlRequest {
    /// The same request with its setpoint negated.
    pub fn negated(self) -> Self {
        match self {
            ControlRequest::Voltage(v) => ControlRequest::Voltage(-v),
            ControlRequest::Position { target, bounded } => ControlRequest::Position {
                target: -target,
                bounded,
            },
            ControlRequest::Velocity(v) => ControlRequest::Velocity(-v),
            ControlRequest::MotionProfiledPosition { target, bounded } => {
                ControlRequest::MotionProfiledPosition {
                    target: -target,
                    bounded,
                }
            }
            ControlRequest::MotionProfiledVelocity(v) => ControlRequest::MotionProfiledVelocity(-v),
        }
    }

    /// Check if the request asks to be bounded by hardware limits.
    pub fn is_bounded(&self) -> bool {
        matches!(
            self,
            ControlRequest::Position { bounded: true, .. }
                | ControlRequest::MotionProfiledPosition { bounded: true, .. }
        )
    }

    /// Check if the request runs through the onboard motion profile.
    pub fn is_motion_profiled(&self) -> bool {
        matches!(
            self,
            ControlRequest::MotionProfiledPosition { .. }
                | ControlRequest::MotionProfiledVelocity(_)
        )
    }

    /// Check if enabled hardware limits stop this request.
    ///
    /// Only an unbounded position request overrides them.
    pub fn respects_limits(&self) -> bool {
        match self {
            ControlRequest::Position { bounded, .. }
            | ControlRequest::MotionProfiledPosition { bounded, .. } => *bounded,
            _ => true,
        }
    }

    /// Get the control mode name as a static string.
    pub fn mode_name(&self) -> &'static str {
        match self {
            ControlRequest::Voltage(_) => "Voltage",
            ControlRequest::Position { .. } => "Position",
            ControlRequest::Velocity(_) => "Velocity",
            ControlRequest::MotionProfiledPosition { .. } => "MotionProfiledPosition",
            ControlRequest::MotionProfiledVelocity(_) => "MotionProfiledVelocity",
        }
    }
}

/// Mounting of a follower relative to its primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Same direction as the primary.
    #[default]
    Aligned,
    /// Mirror-mounted; output is negated.
    Opposed,
}

impl Orientation {
    /// Derive the follower's request from the primary's.
    #[inline]
    pub fn apply(self, request: ControlRequest) -> ControlRequest {
        match self {
            Orientation::Aligned => request,
            Orientation::Opposed => request.negated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_keeps_bound() {
        let request = ControlRequest::MotionProfiledPosition {
            target: Rotations(1.5),
            bounded: true,
        };
        assert_eq!(
            request.negated(),
            ControlRequest::MotionProfiledPosition {
                target: Rotations(-1.5),
                bounded: true,
            }
        );
    }

    #[test]
    fn test_orientation_apply() {
        let request = ControlRequest::Velocity(RotationsPerSec(75.0));
        assert_eq!(Orientation::Aligned.apply(request), request);
        assert_eq!(
            Orientation::Opposed.apply(request),
            ControlRequest::Velocity(RotationsPerSec(-75.0))
        );
    }

    #[test]
    fn test_only_unbounded_position_overrides_limits() {
        assert!(ControlRequest::Voltage(Volts(6.0)).respects_limits());
        assert!(ControlRequest::Velocity(RotationsPerSec(1.0)).respects_limits());
        assert!(!ControlRequest::Position {
            target: Rotations(1.0),
            bounded: false
        }
        .respects_limits());
        assert!(ControlRequest::Position {
            target: Rotations(1.0),
            bounded: true
        }
        .respects_limits());
    }
}
