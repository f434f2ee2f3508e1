//! Quaternion conversion and interpolation
//!
//! Quaternions are stored in `[w, x, y, z]` order. Euler angles follow the
//! roll (X), pitch (Y), yaw (Z) convention, composed as `Z * Y * X`, which
//! matches the Euler branch of [`crate::Transform`].

use glam::{Mat4, Vec3};
use std::ops::Neg;

/// Below this `sin(half_theta)` SLERP averages the inputs instead of dividing.
const SLERP_DEGENERATE_SIN: f32 = 0.001;

/// Rotation quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new quaternion from `w, x, y, z` components
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Create from a `[w, x, y, z]` array
    pub const fn from_array(q: [f32; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }

    /// Components as `[w, x, y, z]`
    pub const fn to_array(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Build from Euler angles in radians
    pub fn from_euler(rot_x: f32, rot_y: f32, rot_z: f32) -> Self {
        let (sx, cx) = (rot_x / 2.0).sin_cos();
        let (sy, cy) = (rot_y / 2.0).sin_cos();
        let (sz, cz) = (rot_z / 2.0).sin_cos();

        Self {
            w: cx * cy * cz + sx * sy * sz,
            x: sx * cy * cz - cx * sy * sz,
            y: cx * sy * cz + sx * cy * sz,
            z: cx * cy * sz - sx * sy * cz,
        }
    }

    /// Build from Euler angles in degrees
    pub fn from_euler_degrees(degrees: Vec3) -> Self {
        Self::from_euler(
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        )
    }

    /// Convert back to `(roll, pitch, yaw)` in radians
    ///
    /// When the pitch sine reaches or exceeds 1 in magnitude the pitch is
    /// pinned to +/-90 degrees instead of feeding `asin` an out-of-domain value.
    pub fn to_euler(&self) -> Vec3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let sinr_cosp = 2.0 * (w * x + y * z);
        let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (w * y - z * x);
        let pitch = if sinp.abs() >= 1.0 {
            std::f32::consts::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (w * z + x * y);
        let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        Vec3::new(roll, pitch, yaw)
    }

    /// Four-component dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Spherical linear interpolation along the shorter arc
    ///
    /// `t` is not clamped; callers pass values in `[0, 1]`.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut cos_half_theta = self.dot(other);

        // Negate one side to take the shorter arc
        let other = if cos_half_theta < 0.0 {
            cos_half_theta = -cos_half_theta;
            -*other
        } else {
            *other
        };

        if cos_half_theta.abs() >= 1.0 {
            return *self;
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        if sin_half_theta.abs() < SLERP_DEGENERATE_SIN {
            return Self {
                w: 0.5 * (self.w + other.w),
                x: 0.5 * (self.x + other.x),
                y: 0.5 * (self.y + other.y),
                z: 0.5 * (self.z + other.z),
            };
        }

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self {
            w: self.w * ratio_a + other.w * ratio_b,
            x: self.x * ratio_a + other.x * ratio_b,
            y: self.y * ratio_a + other.y * ratio_b,
            z: self.z * ratio_a + other.z * ratio_b,
        }
    }

    /// Rotation matrix for this quaternion (column-major)
    ///
    /// The quaternion is used as-is; a non-unit input scales the result.
    pub fn to_rotation_matrix(&self) -> Mat4 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Mat4::from_cols_array(&[
            1.0 - (yy + zz),
            xy + wz,
            xz - wy,
            0.0,
            xy - wz,
            1.0 - (xx + zz),
            yz + wx,
            0.0,
            xz + wy,
            yz - wx,
            1.0 - (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// True when both quaternions describe the same rotation within `epsilon`
    pub fn same_rotation(&self, other: &Self, epsilon: f32) -> bool {
        let close = |a: &Self, b: &Self| {
            (a.w - b.w).abs() <= epsilon
                && (a.x - b.x).abs() <= epsilon
                && (a.y - b.y).abs() <= epsilon
                && (a.z - b.z).abs() <= epsilon
        };
        close(self, other) || close(self, &-*other)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            w: -self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Convert Euler angles (radians) to a quaternion
pub fn euler_to_quaternion(rot_x: f32, rot_y: f32, rot_z: f32) -> Quaternion {
    Quaternion::from_euler(rot_x, rot_y, rot_z)
}

/// Convert a quaternion to `(roll, pitch, yaw)` in radians
pub fn quaternion_to_euler(q: &Quaternion) -> Vec3 {
    q.to_euler()
}

/// Shortest-path spherical linear interpolation
pub fn slerp(q1: &Quaternion, q2: &Quaternion, t: f32) -> Quaternion {
    q1.slerp(q2, t)
}
