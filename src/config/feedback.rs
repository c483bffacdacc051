//! Feedback sensor selection.

use serde::Deserialize;

/// Where the device's closed loop takes position and velocity from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    /// Integrated rotor encoder.
    RotorSensor,
    /// Remote absolute sensor on the bus, used directly.
    RemoteSensor,
    /// Remote absolute sensor fused with the rotor encoder.
    FusedSensor,
}

impl FeedbackSource {
    /// Whether this source reads a remote sensor.
    #[inline]
    pub fn is_remote(self) -> bool {
        !matches!(self, FeedbackSource::RotorSensor)
    }
}

/// Feedback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeedbackConfig {
    /// Sensor the closed loop runs on.
    pub source: FeedbackSource,

    /// Bus id of the remote sensor (required for remote and fused sources).
    #[serde(default)]
    pub remote_sensor_id: Option<u8>,

    /// Rotor rotations per sensor rotation.
    pub rotor_to_sensor_ratio: f32,

    /// Sensor rotations per mechanism rotation.
    pub sensor_to_mechanism_ratio: f32,
}

impl FeedbackConfig {
    /// Feedback from the integrated rotor sensor.
    pub fn rotor(rotor_to_sensor_ratio: f32) -> Self {
        Self {
            source: FeedbackSource::RotorSensor,
            remote_sensor_id: None,
            rotor_to_sensor_ratio,
            sensor_to_mechanism_ratio: 1.0,
        }
    }

    /// Feedback fused from a remote sensor and the rotor.
    pub fn fused(remote_sensor_id: u8, rotor_to_sensor_ratio: f32) -> Self {
        Self {
            source: FeedbackSource::FusedSensor,
            remote_sensor_id: Some(remote_sensor_id),
            rotor_to_sensor_ratio,
            sensor_to_mechanism_ratio: 1.0,
        }
    }

    /// Remote sensor id if the source uses one.
    pub fn remote_sensor(&self) -> Option<u8> {
        if self.source.is_remote() {
            self.remote_sensor_id
        } else {
            None
        }
    }

    /// Rotor rotations per mechanism rotation.
    pub fn rotor_to_mechanism_ratio(&self) -> f32 {
        self.rotor_to_sensor_ratio * self.sensor_to_mechanism_ratio
    }
}
