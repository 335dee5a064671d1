//! Minimal vector, rotation, and geodetic types read from the estimator.

use serde::{Deserialize, Serialize};

/// Three-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Row-major 3x3 matrix; rows `a`, `b`, `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    pub a: Vector3,
    pub b: Vector3,
    pub c: Vector3,
}

impl Matrix3 {
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    pub const fn identity() -> Self {
        Self::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation quaternion, `q1` being the scalar part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub q1: f32,
    pub q2: f32,
    pub q3: f32,
    pub q4: f32,
}

impl Quaternion {
    pub const fn new(q1: f32, q2: f32, q3: f32, q4: f32) -> Self {
        Self { q1, q2, q3, q4 }
    }

    /// Converts an orthonormal rotation matrix.
    ///
    /// Branches on the largest diagonal term to keep the divisor away
    /// from zero.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let (m00, m11, m22) = (m.a.x, m.b.y, m.c.z);
        let (m10, m01) = (m.b.x, m.a.y);
        let (m20, m02) = (m.c.x, m.a.z);
        let (m21, m12) = (m.c.y, m.b.z);
        let tr = m00 + m11 + m22;

        if tr > 0.0 {
            let s = (tr + 1.0).sqrt() * 2.0;
            Self::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        }
    }

    /// Components as `[q1, q2, q3, q4]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }
}

/// Geodetic location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in 1e-7 degrees.
    pub lat: i32,
    /// Longitude in 1e-7 degrees.
    pub lng: i32,
    /// Altitude in centimetres.
    pub alt_cm: i32,
}

impl Location {
    /// Altitude in metres.
    pub fn altitude_m(&self) -> f32 {
        self.alt_cm as f32 * 0.01
    }
}
