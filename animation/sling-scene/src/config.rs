//! Scene tunables
//!
//! Every section falls back to its default values, so a YAML file only needs
//! to name the keys it changes:
//!
//! ```yaml
//! ballistic:
//!   vertical_angle: 60
//! tower:
//!   height: 7
//!   position: [10, 0, -4]
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sling_math::Transform;

use crate::error::Result;

/// Starting position, Euler rotation (degrees) and scale of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.scale)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }
}

/// Projectile launch and impact parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticConfig {
    /// Gravity used by the projectile integrator
    pub gravity: f32,
    pub launch_speed: f32,
    /// Elevation in degrees
    pub vertical_angle: f32,
    /// Heading in degrees
    pub horizontal_angle: f32,
    /// Where a launched bird starts, also its pull-back reset point
    pub launch_point: Vec3,
    /// Maximum |dx| and |dz| from the tower base that counts as a hit
    pub hit_radius: f32,
    /// Projectile must be below this height to hit
    pub hit_height: f32,
}

impl Default for BallisticConfig {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            launch_speed: 2.5,
            vertical_angle: 45.0,
            horizontal_angle: 45.0,
            launch_point: Vec3::new(0.0, 1.0, -1.0),
            hit_radius: 1.0,
            hit_height: 5.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Number of blocks
    pub height: usize,
    /// World placement of the bottom block
    pub position: Vec3,
    pub block_size: Vec3,
    /// Vertical gap between stacked blocks
    pub block_spacing: f32,
    /// Delay between consecutive blocks starting to fall
    pub stagger_ms: f64,
    /// Gravity for falling blocks and the pig
    pub gravity: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            height: 5,
            position: Vec3::new(12.0, 0.0, -6.0),
            block_size: Vec3::ONE,
            block_spacing: 0.1,
            stagger_ms: 100.0,
            gravity: 9.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlingshotConfig {
    pub pose: Pose,
    /// Bend added per pull-back tick
    pub pull_step: f32,
    /// Bend removed per firing tick
    pub release_step: f32,
    pub max_bend: f32,
    /// Per-tick nudge applied to the loaded bird while pulling back
    pub pull_offset: Vec3,
}

impl Default for SlingshotConfig {
    fn default() -> Self {
        Self {
            pose: Pose::new(Vec3::ZERO, Vec3::new(0.0, -45.0, 0.0), Vec3::splat(0.4)),
            pull_step: 0.1,
            release_step: 1.0,
            max_bend: 8.0,
            pull_offset: Vec3::new(-0.007, -0.0035, 0.007),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PigConfig {
    pub pose: Pose,
    /// Deformation added per frame while dying
    pub deform_step: f32,
    pub deform_max: f32,
}

impl Default for PigConfig {
    fn default() -> Self {
        Self {
            pose: Pose::new(
                Vec3::new(10.0, 4.9, -6.0),
                Vec3::new(-90.0, -45.0, 0.0),
                Vec3::splat(1.5),
            ),
            deform_step: 0.02,
            deform_max: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdsConfig {
    /// Spline-driven bird
    pub red: Pose,
    /// Ballistic bird
    pub blue: Pose,
}

impl Default for BirdsConfig {
    fn default() -> Self {
        Self {
            red: Pose::new(
                Vec3::new(3.0, -1.0, 3.0),
                Vec3::new(270.0, 200.0, 0.0),
                Vec3::splat(0.12),
            ),
            blue: Pose::new(
                Vec3::new(-3.0, 0.0, -2.0),
                Vec3::new(270.0, 135.0, 0.0),
                Vec3::splat(0.05),
            ),
        }
    }
}

/// All scene tunables
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub ballistic: BallisticConfig,
    pub tower: TowerConfig,
    pub slingshot: SlingshotConfig,
    pub pig: PigConfig,
    pub birds: BirdsConfig,
}

impl SceneConfig {
    /// Parse YAML, filling missing keys with defaults
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Read and parse a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
