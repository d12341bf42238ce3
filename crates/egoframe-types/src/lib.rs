//! `egoframe-types` – plain numeric input contract shared by the converter
//! and its front ends.
//!
//! Nothing in here depends on a simulator library.  The host-integration
//! layer copies the simulator's location/rotation values into these types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 3-D vector in the host simulator's left-handed world convention
/// (x forward, y right, z up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Orientation in degrees, following the host's right-handed z-down
/// (aircraft-style) rotation convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Rotation {
    /// Nose-up rotation about the lateral axis (degrees).
    pub pitch: f64,
    /// Heading rotation about the vertical axis (degrees).
    pub yaw: f64,
    /// Rotation about the longitudinal axis (degrees).
    pub roll: f64,
}

impl Rotation {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// Position and orientation of the ego vehicle in the host world frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EgoPose {
    pub location: Vector3D,
    pub rotation: Rotation,
}

impl EgoPose {
    pub fn new(location: Vector3D, rotation: Rotation) -> Self {
        Self { location, rotation }
    }

    /// Reject poses carrying NaN or infinite fields.
    ///
    /// The first offending field is reported, in the order
    /// `location.x/y/z`, `rotation.pitch/yaw/roll`.
    pub fn validate(&self) -> Result<(), FrameError> {
        let fields = [
            ("location.x", self.location.x),
            ("location.y", self.location.y),
            ("location.z", self.location.z),
            ("rotation.pitch", self.rotation.pitch),
            ("rotation.yaw", self.rotation.yaw),
            ("rotation.roll", self.rotation.roll),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some((field, value)) => Err(FrameError::InvalidPose {
                field: (*field).to_string(),
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

/// Errors raised while building a converter or loading its inputs.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameError {
    #[error("Invalid ego pose: {field} is {value}")]
    InvalidPose { field: String, value: f64 },

    #[error("Scenario Error: {0}")]
    Scenario(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_serialization_roundtrip() {
        let pose = EgoPose::new(Vector3D::new(10.0, 5.0, 0.5), Rotation::new(1.0, 90.0, -2.0));
        let json = serde_json::to_string(&pose).unwrap();
        let back: EgoPose = serde_json::from_str(&json).unwrap();
        assert_eq!(pose, back);
    }

    #[test]
    fn finite_pose_validates() {
        let pose = EgoPose::new(Vector3D::new(1.0, -2.0, 3.0), Rotation::new(0.0, 180.0, 45.0));
        assert!(pose.validate().is_ok());
    }

    #[test]
    fn nan_location_is_rejected() {
        let pose = EgoPose::new(Vector3D::new(0.0, f64::NAN, 0.0), Rotation::default());
        match pose.validate() {
            Err(FrameError::InvalidPose { field, value }) => {
                assert_eq!(field, "location.y");
                assert!(value.is_nan());
            }
            other => panic!("expected InvalidPose, got {other:?}"),
        }
    }

    #[test]
    fn infinite_rotation_is_rejected() {
        let pose = EgoPose::new(Vector3D::zero(), Rotation::new(0.0, f64::INFINITY, 0.0));
        let err = pose.validate().unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidPose {
                field: "rotation.yaw".to_string(),
                value: f64::INFINITY,
            }
        );
    }

    #[test]
    fn first_bad_field_is_reported() {
        let pose = EgoPose::new(
            Vector3D::new(f64::NEG_INFINITY, 0.0, 0.0),
            Rotation::new(f64::NAN, 0.0, 0.0),
        );
        let err = pose.validate().unwrap_err();
        assert!(err.to_string().contains("location.x"), "got: {err}");
    }

    #[test]
    fn vector_from_array_and_add() {
        let v = Vector3D::from([1.0, 2.0, 3.0]).add(Vector3D::new(0.5, -2.0, 1.0));
        assert_eq!(v, Vector3D::new(1.5, 0.0, 4.0));
    }

    #[test]
    fn frame_error_display() {
        let err = FrameError::Scenario("missing [pose]".to_string());
        assert!(err.to_string().contains("Scenario Error"));
        assert!(err.to_string().contains("missing [pose]"));
    }
}
