//! Rigid transforms with a dual Euler/quaternion rotation
//!
//! A [`Transform`] keeps both rotation representations. The [`RotationMode`]
//! flag picks the authoritative one when building the matrix; the other keeps
//! its last value so it can be inspected or switched back to.

use glam::{Mat4, Vec3};

use crate::quaternion::Quaternion;

/// Which rotation representation drives the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Euler angles in degrees, applied as `Rz * Ry * Rx`
    #[default]
    Euler,
    /// Quaternion rotation
    Quaternion,
}

/// The authoritative rotation of a transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Euler angles in degrees
    Euler(Vec3),
    /// Rotation quaternion
    Quaternion(Quaternion),
}

impl Orientation {
    /// Rotation matrix for this orientation
    pub fn to_matrix(&self) -> Mat4 {
        match self {
            Self::Euler(degrees) => euler_rotation_matrix(*degrees),
            Self::Quaternion(q) => q.to_rotation_matrix(),
        }
    }
}

/// Position, rotation and scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler rotation in degrees
    pub rotation: Vec3,
    /// Quaternion rotation, used when `mode` is [`RotationMode::Quaternion`]
    pub quaternion: Quaternion,
    pub scale: Vec3,
    mode: RotationMode,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        quaternion: Quaternion::IDENTITY,
        scale: Vec3::ONE,
        mode: RotationMode::Euler,
    };

    /// Create a transform with an Euler rotation in degrees
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Self::IDENTITY
        }
    }

    /// Create a pure translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Currently authoritative rotation representation
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Active orientation
    pub fn orientation(&self) -> Orientation {
        match self.mode {
            RotationMode::Euler => Orientation::Euler(self.rotation),
            RotationMode::Quaternion => Orientation::Quaternion(self.quaternion),
        }
    }

    /// Store `orientation` and make it authoritative
    pub fn set_orientation(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Euler(degrees) => self.set_euler(degrees),
            Orientation::Quaternion(q) => self.set_quaternion(q),
        }
    }

    /// Set the Euler rotation (degrees) and switch to Euler mode
    pub fn set_euler(&mut self, degrees: Vec3) {
        self.rotation = degrees;
        self.mode = RotationMode::Euler;
    }

    /// Set the quaternion rotation and switch to quaternion mode
    pub fn set_quaternion(&mut self, q: Quaternion) {
        self.quaternion = q;
        self.mode = RotationMode::Quaternion;
    }

    /// Switch modes without touching either stored rotation
    pub fn set_mode(&mut self, mode: RotationMode) {
        self.mode = mode;
    }

    /// Offset the position
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotation matrix of the active representation
    pub fn rotation_matrix(&self) -> Mat4 {
        self.orientation().to_matrix()
    }

    /// Model matrix `T * R * S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation_matrix() * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Euler rotation matrix `Rz * Ry * Rx` from angles in degrees
pub fn euler_rotation_matrix(degrees: Vec3) -> Mat4 {
    Mat4::from_rotation_z(degrees.z.to_radians())
        * Mat4::from_rotation_y(degrees.y.to_radians())
        * Mat4::from_rotation_x(degrees.x.to_radians())
}

/// Model matrix `T * Rz * Ry * Rx * S` with the rotation in degrees
pub fn compose_matrix(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * euler_rotation_matrix(rotation) * Mat4::from_scale(scale)
}
