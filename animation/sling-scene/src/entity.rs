//! Mesh-backed scene entities

use std::fmt;

use glam::{Mat4, Vec3};
use sling_math::Transform;

use crate::config::Pose;

/// Entities whose geometry comes from an external mesh loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    RedBird,
    BlueBird,
    Pig,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::RedBird, Self::BlueBird, Self::Pig];

    pub fn name(self) -> &'static str {
        match self {
            Self::RedBird => "Red",
            Self::BlueBird => "Blue",
            Self::Pig => "Pig",
        }
    }

    /// Mesh drawn for this entity
    pub fn mesh(self) -> MeshKind {
        match self {
            Self::RedBird => MeshKind::RedBird,
            Self::BlueBird => MeshKind::BlueBird,
            Self::Pig => MeshKind::Pig,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry a draw call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    RedBird,
    BlueBird,
    Pig,
    /// Wooden post of the slingshot frame
    SlingshotPost,
    /// Skinned rubber band
    SlingshotBand,
    /// Procedural tower cube
    TowerBlock,
}

/// A positioned model with a load flag
#[derive(Debug, Clone)]
pub struct Entity {
    kind: EntityKind,
    loaded: bool,
    ready_reported: bool,
    pub transform: Transform,
    /// Euler rotation restored whenever the entity is reset
    pub original_rotation: Vec3,
}

impl Entity {
    pub fn new(kind: EntityKind, pose: &Pose) -> Self {
        Self {
            kind,
            loaded: false,
            ready_reported: false,
            transform: pose.transform(),
            original_rotation: pose.rotation,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// True exactly once, on the first call after the entity has loaded
    pub fn take_ready(&mut self) -> bool {
        if self.loaded && !self.ready_reported {
            self.ready_reported = true;
            return true;
        }
        false
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn add_position(&mut self, delta: Vec3) {
        self.transform.translate(delta);
    }

    /// Move to `position` and restore the original Euler rotation
    pub fn reset_pose(&mut self, position: Vec3) {
        self.transform.position = position;
        self.transform.set_euler(self.original_rotation);
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}
