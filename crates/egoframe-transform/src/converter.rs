//! World-to-ego frame converter.
//!
//! The host simulator reports locations in a left-handed frame (x forward,
//! y right, z up) and orientations as yaw/pitch/roll in degrees under a
//! right-handed z-down convention.  [`FrameConverter`] maps world-frame
//! vectors into the ego vehicle's frame, expressed right-handed z-up
//! (x forward, y left, z up).
//!
//! Conversion rules:
//! - vectors and locations: negate y.  This includes the ego location used
//!   for the translation term, whose z keeps its sign.  Host-side helpers
//!   that also negate z there put an elevated ego at `(0, 0, 2z)` in its own
//!   frame.
//! - yaw and pitch: negate, since both turn the opposite way once y points
//!   left.  Roll keeps its sign.
//! - orientation: intrinsic z-y-x composition, then transposed so the matrix
//!   expresses the world as seen from the ego vehicle.
//!
//! # Example
//!
//! ```rust
//! use egoframe_transform::FrameConverter;
//! use egoframe_types::{EgoPose, Rotation, Vector3D};
//!
//! let pose = EgoPose::new(Vector3D::new(10.0, 5.0, 0.0), Rotation::new(0.0, 90.0, 0.0));
//! let conv = FrameConverter::new(pose).unwrap();
//!
//! // World +x lies on the ego vehicle's left.
//! let v = conv.rotate_world_to_ego(Vector3D::new(1.0, 0.0, 0.0));
//! assert!(v[0].abs() < 1e-9 && (v[1] - 1.0).abs() < 1e-9);
//!
//! // The ego location is the ego origin.
//! let p = conv.transform_world_to_ego(pose.location);
//! assert!(p.iter().all(|c| c.abs() < 1e-9));
//! ```

use std::cell::OnceCell;

use egoframe_types::{EgoPose, FrameError, Vector3D};
use tracing::{debug, warn};

use crate::matrix::{HomogeneousTransform, RotationMatrix};

/// Host left-handed vector to right-handed components.
fn to_right_handed(v: Vector3D) -> [f64; 3] {
    [v.x, -v.y, v.z]
}

/// Converts world-frame points and vectors into the frame of one ego pose.
///
/// Both matrices are computed at most once, on the first query that needs
/// them, and never change afterwards.  A new pose needs a new converter.
///
/// The caches are [`OnceCell`]s, so a converter cannot be shared across
/// threads; build one per thread instead.
#[derive(Debug)]
pub struct FrameConverter {
    pose: EgoPose,
    rotation: OnceCell<RotationMatrix>,
    transform: OnceCell<HomogeneousTransform>,
}

impl FrameConverter {
    /// Create a converter for `pose`.
    ///
    /// Returns [`FrameError::InvalidPose`] if any location or rotation field
    /// is NaN or infinite.
    pub fn new(pose: EgoPose) -> Result<Self, FrameError> {
        if let Err(e) = pose.validate() {
            warn!(error = %e, "rejecting ego pose");
            return Err(e);
        }
        Ok(Self {
            pose,
            rotation: OnceCell::new(),
            transform: OnceCell::new(),
        })
    }

    /// The pose this converter was built for.
    pub fn pose(&self) -> &EgoPose {
        &self.pose
    }

    /// Rotate a free vector from the world frame into the ego frame.
    ///
    /// No translation is applied.  Non-finite components propagate.
    pub fn rotate_world_to_ego(&self, vector: Vector3D) -> [f64; 3] {
        self.rotation_matrix().mul_vec(to_right_handed(vector))
    }

    /// Transform a point from the world frame into the ego frame, including
    /// translation.
    pub fn transform_world_to_ego(&self, point: Vector3D) -> [f64; 3] {
        self.homogeneous_transform()
            .transform_point(to_right_handed(point))
    }

    /// World-to-ego rotation, computed on first use.
    pub fn rotation_matrix(&self) -> &RotationMatrix {
        self.rotation.get_or_init(|| {
            let rot = self.pose.rotation;
            let ego_to_world = RotationMatrix::from_euler_zyx_degrees(-rot.yaw, -rot.pitch, rot.roll);
            debug!(yaw = rot.yaw, pitch = rot.pitch, roll = rot.roll, "rotation matrix cached");
            ego_to_world.transpose()
        })
    }

    /// World-to-ego homogeneous transform, computed on first use.
    pub fn homogeneous_transform(&self) -> &HomogeneousTransform {
        self.transform.get_or_init(|| {
            let r = *self.rotation_matrix();
            let origin = r.mul_vec(to_right_handed(self.pose.location));
            let translation = [-origin[0], -origin[1], -origin[2]];
            debug!(?translation, "homogeneous transform cached");
            HomogeneousTransform::from_rotation_translation(r, translation)
        })
    }

    /// Whether the rotation matrix has been computed yet.
    pub fn rotation_cached(&self) -> bool {
        self.rotation.get().is_some()
    }

    /// Whether the homogeneous transform has been computed yet.
    pub fn transform_cached(&self) -> bool {
        self.transform.get().is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
