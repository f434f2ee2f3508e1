//! Rotation math for the slingshot scene
//!
//! This crate holds the pure, stateless pieces the animation crates build on:
//! - [`Quaternion`] with Euler conversion and shortest-path SLERP
//! - [`Transform`] with a dual Euler/quaternion rotation representation
//!
//! Vectors and matrices are `glam` types, re-exported here so downstream
//! crates do not need a direct `glam` dependency.
//!
//! # Example
//!
//! ```rust
//! use sling_math::{Quaternion, Transform, Vec3};
//!
//! let a = Quaternion::from_euler_degrees(Vec3::new(0.0, 0.0, 0.0));
//! let b = Quaternion::from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
//! let halfway = a.slerp(&b, 0.5);
//!
//! let mut transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
//! transform.set_quaternion(halfway);
//! let model = transform.to_matrix();
//! assert!((model.w_axis.x - 1.0).abs() < 1e-6);
//! ```

pub mod quaternion;
pub mod transform;

pub use glam::{Mat4, Vec3, Vec4};
pub use quaternion::{Quaternion, euler_to_quaternion, quaternion_to_euler, slerp};
pub use transform::{Orientation, RotationMode, Transform, compose_matrix, euler_rotation_matrix};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
