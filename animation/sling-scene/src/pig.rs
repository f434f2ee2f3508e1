//! The pig on top of the tower

use glam::Vec3;
use log::{debug, trace};

use crate::config::PigConfig;
use crate::entity::{Entity, EntityKind};
use crate::tower::FallMotion;

/// Pig entity with its death deformation and free fall
#[derive(Debug, Clone)]
pub struct Pig {
    pub entity: Entity,
    pub motion: FallMotion,
    deform: f32,
    dying: bool,
    deform_step: f32,
    deform_max: f32,
}

impl Pig {
    pub fn new(config: &PigConfig) -> Self {
        let entity = Entity::new(EntityKind::Pig, &config.pose);
        Self {
            motion: FallMotion {
                origin: entity.position(),
                ..FallMotion::default()
            },
            entity,
            deform: 0.0,
            dying: false,
            deform_step: config.deform_step,
            deform_max: config.deform_max,
        }
    }

    /// Current deformation passed to the renderer
    pub fn deform(&self) -> f32 {
        self.deform
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    /// Start the death animation; `true` only on the transition
    pub fn kill(&mut self) -> bool {
        if self.dying {
            return false;
        }
        self.dying = true;
        debug!("Pig death begins");
        true
    }

    /// Undo the death animation
    pub fn revive(&mut self) {
        self.deform = 0.0;
        self.dying = false;
    }

    /// Grow the deformation by one frame's step while dying
    pub fn update_deform(&mut self) {
        if self.dying && self.deform < self.deform_max {
            self.deform += self.deform_step;
        }
    }

    /// Start a free fall from the current position
    pub fn start_fall(&mut self, start_ms: f64, velocity: Vec3, angular_velocity: Vec3) {
        let origin = self.entity.position();
        self.motion.start(origin, start_ms, velocity, angular_velocity);
    }

    /// Recompute the fall pose for `now_ms`, landing at `y = 0`
    pub fn update_fall(&mut self, now_ms: f64, gravity: f32) {
        if !self.motion.falling {
            return;
        }
        let Some(dt) = self.motion.elapsed(now_ms) else {
            return;
        };

        let (position, rotation) = self.motion.pose_at(dt, gravity);
        self.entity.transform.position = position;
        self.entity.transform.set_euler(rotation);

        if position.y < 0.0 {
            self.entity.transform.position.y = 0.0;
            let landed = self.entity.transform.position;
            self.motion.settle(landed);
            trace!("pig landed at {landed}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_is_edge_triggered() {
        let mut pig = Pig::new(&PigConfig::default());
        assert!(pig.kill());
        assert!(!pig.kill());
        pig.revive();
        assert!(pig.kill());
    }

    #[test]
    fn test_deform_grows_to_limit() {
        let mut pig = Pig::new(&PigConfig::default());
        pig.update_deform();
        assert_eq!(pig.deform(), 0.0);

        pig.kill();
        for _ in 0..500 {
            pig.update_deform();
        }
        // Stops on the first step at or past the limit
        assert!(pig.deform() >= 2.5 && pig.deform() < 2.5 + 0.02 + 1e-4);

        pig.revive();
        assert_eq!(pig.deform(), 0.0);
        assert!(!pig.is_dying());
    }

    #[test]
    fn test_fall_lands_on_ground() {
        let mut pig = Pig::new(&PigConfig::default());
        pig.start_fall(0.0, Vec3::new(1.0, 0.5, 0.0), Vec3::new(10.0, 0.0, 0.0));

        pig.update_fall(500.0, 9.8);
        let mid = pig.entity.position();
        assert!((mid.x - 10.5).abs() < 1e-5);
        assert!((pig.entity.transform.rotation.x - 5.0).abs() < 1e-5);

        pig.update_fall(5000.0, 9.8);
        assert_eq!(pig.entity.position().y, 0.0);
        assert!(!pig.motion.falling);
        assert_eq!(pig.motion.velocity, Vec3::ZERO);
    }
}
