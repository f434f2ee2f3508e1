//! Collapsing block tower
//!
//! The tower is a strictly linear chain in a [`Hierarchy`]: block 0 sits at
//! the tower placement and each block above it is positioned relative to the
//! one below. A collapse is scripted rather than simulated. Every block gets a
//! random impulse, scaled up the higher it sits, and starts falling on a
//! staggered schedule from the top down. Poses are recomputed from the time
//! since each block's fall start on every tick, so replaying a tick with the
//! same clock value gives the same pose.

use glam::{Vec3, Vec4};
use log::{debug, info, trace};
use rand::Rng;
use sling_math::Transform;

use crate::config::TowerConfig;
use crate::error::{Result, SceneError};
use crate::hierarchy::{Hierarchy, NodeId};
use crate::pig::Pig;

/// Kinematic fall parameters shared by tower blocks and the pig
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FallMotion {
    pub velocity: Vec3,
    /// Degrees per second about each axis
    pub angular_velocity: Vec3,
    pub falling: bool,
    pub fall_start_ms: f64,
    /// Position the fall is measured from
    pub origin: Vec3,
}

impl FallMotion {
    /// Random impulse scaled by `force_factor`
    pub fn random_impulse<R: Rng + ?Sized>(rng: &mut R, force_factor: f32) -> (Vec3, Vec3) {
        let velocity = Vec3::new(
            (rng.random::<f32>() - 0.5) * 2.0 * force_factor,
            rng.random::<f32>() * 2.0 * force_factor,
            (rng.random::<f32>() - 0.5) * force_factor,
        );
        let angular_velocity = Vec3::new(
            rng.random::<f32>() * 2.0 * force_factor,
            rng.random::<f32>() * 2.0 * force_factor,
            rng.random::<f32>() * 2.0 * force_factor,
        );
        (velocity, angular_velocity)
    }

    /// Begin falling from `origin` at `start_ms`
    pub fn start(&mut self, origin: Vec3, start_ms: f64, velocity: Vec3, angular_velocity: Vec3) {
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        self.falling = true;
        self.fall_start_ms = start_ms;
        self.origin = origin;
    }

    /// Seconds since the fall start, or `None` while the start lies ahead
    pub fn elapsed(&self, now_ms: f64) -> Option<f32> {
        (now_ms >= self.fall_start_ms).then(|| ((now_ms - self.fall_start_ms) / 1000.0) as f32)
    }

    /// Position and Euler rotation after `dt` seconds
    pub fn pose_at(&self, dt: f32, gravity: f32) -> (Vec3, Vec3) {
        let mut position = self.origin + self.velocity * dt;
        position.y -= 0.5 * gravity * dt * dt;
        (position, self.angular_velocity * dt)
    }

    /// Zero velocities, stop falling and re-baseline at `position`
    pub fn settle(&mut self, position: Vec3) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.falling = false;
        self.origin = position;
    }

    pub fn hold(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }
}

/// Payload of a tower node
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Position in the stack, 0 at the bottom
    pub index: usize,
    pub color: Vec4,
    pub motion: FallMotion,
}

/// Collapse progress derived from the block flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowerState {
    Standing,
    Collapsing,
    Settled,
}

const BLOCK_COLOR: Vec4 = Vec4::new(1.0, 0.0, 1.0, 1.0);

/// A stack of blocks with an optional pig riding on top
#[derive(Debug, Clone)]
pub struct Tower {
    hierarchy: Hierarchy<Block>,
    blocks: Vec<NodeId>,
    position: Vec3,
    gravity: f32,
    stagger_ms: f64,
    collapsing: bool,
    collapse_start_ms: Option<f64>,
    pig: Option<Pig>,
}

impl Tower {
    /// Build the block chain described by `config`
    pub fn new(config: &TowerConfig) -> Result<Self> {
        let mut hierarchy = Hierarchy::new();
        let mut blocks = Vec::with_capacity(config.height);
        let step = Vec3::new(0.0, config.block_size.y + config.block_spacing, 0.0);

        for index in 0..config.height {
            let local = Transform::new(
                if index == 0 { config.position } else { step },
                Vec3::ZERO,
                config.block_size,
            );
            let block = Block {
                index,
                color: BLOCK_COLOR,
                motion: FallMotion {
                    origin: local.position,
                    ..FallMotion::default()
                },
            };
            let id = match blocks.last() {
                Some(&parent) => hierarchy.add_child(parent, local, block)?,
                None => hierarchy.add_root(local, block),
            };
            blocks.push(id);
        }

        Ok(Self {
            hierarchy,
            blocks,
            position: config.position,
            gravity: config.gravity,
            stagger_ms: config.stagger_ms,
            collapsing: false,
            collapse_start_ms: None,
            pig: None,
        })
    }

    /// Attach the entity that falls along with the tower
    pub fn with_pig(mut self, pig: Pig) -> Self {
        self.pig = Some(pig);
        self
    }

    pub fn pig(&self) -> Option<&Pig> {
        self.pig.as_ref()
    }

    pub fn pig_mut(&mut self) -> Option<&mut Pig> {
        self.pig.as_mut()
    }

    /// Placement of the bottom block, used for hit detection
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn hierarchy(&self) -> &Hierarchy<Block> {
        &self.hierarchy
    }

    /// Block node ids from bottom to top
    pub fn block_ids(&self) -> &[NodeId] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        let id = *self.blocks.get(index)?;
        self.hierarchy.get(id).map(|node| &node.data)
    }

    /// Local transform of block `index`
    pub fn block_transform(&self, index: usize) -> Option<&Transform> {
        let id = *self.blocks.get(index)?;
        self.hierarchy.get(id).map(|node| &node.local)
    }

    /// Translation-only world position of block `index`
    pub fn block_world_position(&self, index: usize) -> Result<Vec3> {
        let id = self
            .blocks
            .get(index)
            .copied()
            .ok_or(SceneError::UnknownNode(index))?;
        self.hierarchy.world_position(id)
    }

    pub fn is_collapsing(&self) -> bool {
        self.collapsing
    }

    pub fn collapse_start_ms(&self) -> Option<f64> {
        self.collapse_start_ms
    }

    pub fn state(&self) -> TowerState {
        if !self.collapsing {
            TowerState::Standing
        } else if self
            .hierarchy
            .iter()
            .any(|(_, node)| node.data.motion.falling)
        {
            TowerState::Collapsing
        } else {
            TowerState::Settled
        }
    }

    /// Start the collapse at `now_ms`
    ///
    /// Returns `false` without touching anything if the tower is already
    /// collapsing.
    pub fn collapse<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        if self.collapsing {
            debug!("Tower collapse requested while already collapsing");
            return false;
        }
        self.collapsing = true;
        self.collapse_start_ms = Some(now_ms);

        let count = self.blocks.len();
        for (index, &id) in self.blocks.iter().enumerate().rev() {
            let from_top = count - 1 - index;
            let fall_start = now_ms + from_top as f64 * self.stagger_ms;
            let force_factor = (count - from_top) as f32 / count as f32;
            let (velocity, angular_velocity) = FallMotion::random_impulse(rng, force_factor);

            if let Some(node) = self.hierarchy.get_mut(id) {
                let origin = node.local.position;
                node.data
                    .motion
                    .start(origin, fall_start, velocity, angular_velocity);
                trace!(
                    "block {index}: fall at {fall_start:.0}ms, velocity {velocity}, spin {angular_velocity}"
                );
            }
        }

        if let Some(pig) = self.pig.as_mut() {
            let (velocity, angular_velocity) = FallMotion::random_impulse(rng, 1.0);
            pig.start_fall(now_ms, velocity, angular_velocity);
        }

        info!("Tower collapse started with {count} blocks");
        true
    }

    /// Recompute block and pig poses for `now_ms`
    pub fn update(&mut self, now_ms: f64) -> Result<()> {
        let Some(&bottom) = self.blocks.first() else {
            return Ok(());
        };
        let anchor = self.blocks.len() - 1;

        let mut stack = vec![bottom];
        while let Some(id) = stack.pop() {
            let node = self.hierarchy.node_mut(id)?;

            if node.data.index == anchor && !node.data.motion.falling {
                // Anchored: hold velocities at zero and leave the subtree alone
                for held in self.hierarchy.subtree(id)? {
                    self.hierarchy.node_mut(held)?.data.motion.hold();
                }
                continue;
            }

            match node.data.motion.elapsed(now_ms) {
                Some(dt) => {
                    let (position, rotation) = node.data.motion.pose_at(dt, self.gravity);
                    node.local.position = position;
                    node.local.set_euler(rotation);

                    let world = self.hierarchy.world_position(id)?;
                    if world.y < 0.0 {
                        let node = self.hierarchy.node_mut(id)?;
                        node.local.position.y -= world.y;
                        let settled = node.local.position;
                        node.data.motion.settle(settled);
                        trace!("block {} settled at {settled}", node.data.index);
                    }
                }
                None if node.data.motion.falling => {
                    // A pending block already resting on the ground never takes off
                    if self.hierarchy.world_position(id)?.y <= 0.0 {
                        let node = self.hierarchy.node_mut(id)?;
                        let resting = node.local.position;
                        node.data.motion.settle(resting);
                        trace!("block {} grounded before its fall", node.data.index);
                    }
                }
                None => {}
            }

            let node = self.hierarchy.node(id)?;
            stack.extend(node.children().iter().rev());
        }

        if let Some(pig) = self.pig.as_mut() {
            pig.update_fall(now_ms, self.gravity);
        }

        Ok(())
    }
}
