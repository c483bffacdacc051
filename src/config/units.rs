//! Unit types for physical quantities.
//!
//! Mechanism positions are measured in rotations of the configured feedback
//! sensor (after `sensor_to_mechanism_ratio`), velocities in rotations per
//! second. Keeping them as distinct types stops a velocity setpoint from being
//! passed where a position is expected.

use core::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

/// Mechanism position in rotations.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Rotations(pub f32);

impl Rotations {
    /// Create a new Rotations value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to degrees.
    #[inline]
    pub fn to_degrees(self) -> f32 {
        self.0 * 360.0
    }

    /// Create from degrees.
    #[inline]
    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees / 360.0)
    }
}

impl Add for Rotations {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Rotations {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Rotations {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Angular velocity in rotations per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct RotationsPerSec(pub f32);

impl RotationsPerSec {
    /// Zero velocity.
    pub const ZERO: Self = Self(0.0);

    /// Create a new RotationsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Neg for RotationsPerSec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<f32> for RotationsPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Angular acceleration in rotations per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct RotationsPerSecSquared(pub f32);

impl RotationsPerSecSquared {
    /// Create a new RotationsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for RotationsPerSecSquared {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Open-loop output voltage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Volts(pub f32);

impl Volts {
    /// Nominal battery voltage the controllers are rated against.
    pub const BUS_NOMINAL: Self = Self(12.0);

    /// Zero output.
    pub const ZERO: Self = Self(0.0);

    /// Create a new Volts value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Output as a fraction of [`Volts::BUS_NOMINAL`], saturated to [-1, 1].
    #[inline]
    pub fn duty_cycle(self) -> f32 {
        (self.0 / Self::BUS_NOMINAL.0).clamp(-1.0, 1.0)
    }
}

impl Neg for Volts {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Rotations.
    fn rotations(self) -> Rotations;
    /// Convert to RotationsPerSec.
    fn rps(self) -> RotationsPerSec;
    /// Convert to RotationsPerSecSquared.
    fn rps_squared(self) -> RotationsPerSecSquared;
    /// Convert to Volts.
    fn volts(self) -> Volts;
}

impl UnitExt for f32 {
    #[inline]
    fn rotations(self) -> Rotations {
        Rotations(self)
    }

    #[inline]
    fn rps(self) -> RotationsPerSec {
        RotationsPerSec(self)
    }

    #[inline]
    fn rps_squared(self) -> RotationsPerSecSquared {
        RotationsPerSecSquared(self)
    }

    #[inline]
    fn volts(self) -> Volts {
        Volts(self)
    }
}
