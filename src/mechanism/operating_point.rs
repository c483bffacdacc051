//! Named operating points.
//!
//! A mechanism with coupled setpoints (flywheel speed plus hood angle) picks
//! them together from a small table instead of letting callers mix values.

use serde::Deserialize;

use crate::config::{Rotations, RotationsPerSec};

/// Named shooter operating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ShotPoint {
    /// Close shot.
    Low,
    /// Mid-field shot.
    Mid,
    /// Long shot.
    High,
}

impl ShotPoint {
    /// Every operating point, slowest first.
    pub const ALL: [ShotPoint; 3] = [ShotPoint::Low, ShotPoint::Mid, ShotPoint::High];
}

/// Table entry for one operating point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointSetting {
    /// Flywheel velocity.
    #[serde(rename = "velocity_rps")]
    pub velocity: RotationsPerSec,

    /// Hood position, used only when the hood is enabled.
    #[serde(rename = "hood_rotations")]
    pub hood: Rotations,
}

/// Coupled setpoints selected together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    /// Flywheel velocity.
    pub velocity: RotationsPerSec,
    /// Hood position; `None` leaves the hood alone.
    pub hood: Option<Rotations>,
}

/// Maps a named point to coupled setpoints.
pub trait OperatingPointPolicy {
    /// Point identifier.
    type Point: Copy;

    /// Setpoints for `point`.
    fn select(&self, point: Self::Point) -> Setpoint;

    /// Setpoints that stop the mechanism.
    fn stopped(&self) -> Setpoint;
}

/// Shooter operating point table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperatingPoints {
    /// Whether selecting a point also drives the hood.
    #[serde(default)]
    pub hood_enabled: bool,
    /// Close shot.
    pub low: PointSetting,
    /// Mid-field shot.
    pub mid: PointSetting,
    /// Long shot.
    pub high: PointSetting,
}

impl Default for OperatingPoints {
    fn default() -> Self {
        Self {
            hood_enabled: false,
            low: PointSetting {
                velocity: RotationsPerSec(50.0),
                hood: Rotations(0.1),
            },
            mid: PointSetting {
                velocity: RotationsPerSec(75.0),
                hood: Rotations(0.2),
            },
            high: PointSetting {
                velocity: RotationsPerSec(100.0),
                hood: Rotations(0.3),
            },
        }
    }
}

impl OperatingPoints {
    /// Table entry for `point`.
    pub fn setting(&self, point: ShotPoint) -> &PointSetting {
        match point {
            ShotPoint::Low => &self.low,
            ShotPoint::Mid => &self.mid,
            ShotPoint::High => &self.high,
        }
    }
}

impl OperatingPointPolicy for OperatingPoints {
    type Point = ShotPoint;

    fn select(&self, point: ShotPoint) -> Setpoint {
        let setting = self.setting(point);
        Setpoint {
            velocity: setting.velocity,
            hood: self.hood_enabled.then_some(setting.hood),
        }
    }

    fn stopped(&self) -> Setpoint {
        Setpoint {
            velocity: RotationsPerSec::ZERO,
            hood: None,
        }
    }
}
