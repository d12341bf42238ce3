//! Small fixed-size matrix types used by the frame converter.
//!
//! Both matrices are row-major `f64` arrays.  [`RotationMatrix`] is built
//! from intrinsic z-y-x Euler angles; [`HomogeneousTransform`] packs a
//! rotation and a translation into a 4×4 matrix acting on `[x, y, z, 1]`.

// ────────────────────────────────────────────────────────────────────────────
// RotationMatrix
// ────────────────────────────────────────────────────────────────────────────

/// A 3×3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    rows: [[f64; 3]; 3],
}

impl RotationMatrix {
    /// Wrap raw rows.  The caller is responsible for orthonormality.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Right-handed rotation about +Z by `deg` degrees.
    pub fn about_z(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Right-handed rotation about +Y by `deg` degrees.
    pub fn about_y(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        Self::from_rows([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Right-handed rotation about +X by `deg` degrees.
    pub fn about_x(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Intrinsic z-y'-x'' composition: `Rz(yaw) · Ry(pitch) · Rx(roll)`.
    ///
    /// All angles are in degrees.
    pub fn from_euler_zyx_degrees(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::about_z(yaw)
            .mul(Self::about_y(pitch))
            .mul(Self::about_x(roll))
    }

    /// Row-major copy of the entries.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.rows
    }

    /// Transpose, which is also the inverse of a rotation.
    pub fn transpose(self) -> Self {
        let r = self.rows;
        Self::from_rows([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    /// Matrix product `self · rhs`.
    pub fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Self::from_rows(out)
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: [f64; 3]) -> [f64; 3] {
        let r = &self.rows;
        [
            r[0][0] * v[0] + r[0][1] * v[1] + r[0][2] * v[2],
            r[1][0] * v[0] + r[1][1] * v[1] + r[1][2] * v[2],
            r[2][0] * v[0] + r[2][1] * v[1] + r[2][2] * v[2],
        ]
    }

    /// Determinant; `1.0` for a proper rotation.
    pub fn determinant(&self) -> f64 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HomogeneousTransform
// ────────────────────────────────────────────────────────────────────────────

/// A 4×4 rigid-body transform: rotation in the top-left block, translation
/// in the last column, bottom row `[0, 0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomogeneousTransform {
    rows: [[f64; 4]; 4],
}

impl HomogeneousTransform {
    /// Build from a rotation block and a translation column.
    pub fn from_rotation_translation(rotation: RotationMatrix, translation: [f64; 3]) -> Self {
        let r = rotation.rows();
        Self {
            rows: [
                [r[0][0], r[0][1], r[0][2], translation[0]],
                [r[1][0], r[1][1], r[1][2], translation[1]],
                [r[2][0], r[2][1], r[2][2], translation[2]],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// No rotation, no translation.
    pub fn identity() -> Self {
        Self::from_rotation_translation(RotationMatrix::identity(), [0.0; 3])
    }

    /// Row-major copy of the entries.
    pub fn rows(&self) -> [[f64; 4]; 4] {
        self.rows
    }

    /// The top-left 3×3 block.
    pub fn rotation(&self) -> RotationMatrix {
        let r = &self.rows;
        RotationMatrix::from_rows([
            [r[0][0], r[0][1], r[0][2]],
            [r[1][0], r[1][1], r[1][2]],
            [r[2][0], r[2][1], r[2][2]],
        ])
    }

    /// The last column without its homogeneous component.
    pub fn translation(&self) -> [f64; 3] {
        [self.rows[0][3], self.rows[1][3], self.rows[2][3]]
    }

    /// Matrix-vector product on a homogeneous 4-vector.
    pub fn mul_vec(&self, v: [f64; 4]) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| self.rows[i][k] * v[k]).sum();
        }
        out
    }

    /// Apply to a point: append `w = 1`, multiply, drop `w`.
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let [x, y, z, _] = self.mul_vec([p[0], p[1], p[2], 1.0]);
        [x, y, z]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
