//! Slingshot rig
//!
//! A fixed hierarchy: the base carries the crossbar and the band, the crossbar
//! carries the two arms. Bend only offsets the band's own matrix, so the
//! wooden frame never moves.

use glam::{Mat4, Vec3};
use sling_math::Transform;

use crate::config::Pose;
use crate::entity::MeshKind;
use crate::error::Result;
use crate::hierarchy::{Hierarchy, NodeId};

/// Named part of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigPart {
    Base,
    Crossbar,
    Band,
    LeftArm,
    RightArm,
}

impl RigPart {
    pub fn mesh(self) -> MeshKind {
        match self {
            Self::Band => MeshKind::SlingshotBand,
            _ => MeshKind::SlingshotPost,
        }
    }
}

/// Offset applied to the band for a given bend
pub fn band_offset(bend: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, -bend / 2.0, bend))
}

/// Bone matrices for the skinned band: `[rest, offset, rest]`
pub fn band_bones(bend: f32) -> [Mat4; 3] {
    [Mat4::IDENTITY, band_offset(bend), Mat4::IDENTITY]
}

#[derive(Debug, Clone)]
pub struct SlingshotRig {
    hierarchy: Hierarchy<RigPart>,
    base: NodeId,
    band: NodeId,
}

impl SlingshotRig {
    /// Build the rig with the base placed at `pose`
    pub fn new(pose: &Pose) -> Result<Self> {
        let mut hierarchy = Hierarchy::new();
        let base = hierarchy.add_root(pose.transform(), RigPart::Base);
        let crossbar = hierarchy.add_child(
            base,
            Transform::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, 90.0), Vec3::ONE),
            RigPart::Crossbar,
        )?;
        let band = hierarchy.add_child(
            base,
            Transform::from_position(Vec3::new(0.0, 6.0, 0.0)),
            RigPart::Band,
        )?;
        hierarchy.add_child(
            crossbar,
            Transform::new(Vec3::new(2.0, 3.0, 0.0), Vec3::new(0.0, 0.0, -90.0), Vec3::ONE),
            RigPart::LeftArm,
        )?;
        hierarchy.add_child(
            crossbar,
            Transform::new(Vec3::new(2.0, -3.0, 0.0), Vec3::new(0.0, 0.0, -90.0), Vec3::ONE),
            RigPart::RightArm,
        )?;

        Ok(Self {
            hierarchy,
            base,
            band,
        })
    }

    pub fn hierarchy(&self) -> &Hierarchy<RigPart> {
        &self.hierarchy
    }

    pub fn base(&self) -> NodeId {
        self.base
    }

    pub fn band(&self) -> NodeId {
        self.band
    }

    /// World matrix of every part in pre-order, with the band bent
    pub fn part_matrices(&self, bend: f32) -> Vec<(RigPart, Mat4)> {
        let mut parts = Vec::with_capacity(self.hierarchy.len());
        self.hierarchy.traverse(|_, node, world| {
            let matrix = if node.data == RigPart::Band {
                world * band_offset(bend)
            } else {
                world
            };
            parts.push((node.data, matrix));
        });
        parts
    }
}
