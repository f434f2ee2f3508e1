//! Closed-form projectile flight
//!
//! Each tick uses the total time since launch as its step, so the trajectory
//! is not a standard integrator:
//!
//! ```text
//! x  += vx * t
//! y  += vy * t + 0.5 * g * t^2
//! vy -= g * t
//! z  += vz * t
//! ```
//!
//! Changing this changes the visible arc.

use glam::Vec3;
use log::{debug, trace};

use crate::config::BallisticConfig;

/// Initial velocity from a speed and two angles in degrees
pub fn initial_velocity(launch_speed: f32, vertical_deg: f32, horizontal_deg: f32) -> Vec3 {
    let vertical = vertical_deg.to_radians();
    let horizontal = horizontal_deg.to_radians();

    Vec3::new(
        launch_speed * vertical.cos() * horizontal.cos(),
        launch_speed * vertical.sin(),
        launch_speed * vertical.sin() * horizontal.sin(),
    )
}

/// What happened during one flight tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightStep {
    /// Projectile entered the tower hit box
    pub hit_tower: bool,
    /// Projectile dropped below the ground and stopped
    pub grounded: bool,
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    start_ms: f64,
    active: bool,
}

impl Projectile {
    /// Start a flight from the configured launch point
    pub fn launch(config: &BallisticConfig, now_ms: f64) -> Self {
        let velocity = initial_velocity(
            config.launch_speed,
            config.vertical_angle,
            config.horizontal_angle,
        );
        debug!(
            "Ballistic launch: speed {}, vertical {}deg, horizontal {}deg, velocity {velocity}",
            config.launch_speed, config.vertical_angle, config.horizontal_angle
        );

        Self {
            position: config.launch_point,
            velocity,
            start_ms: now_ms,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Apply one closed-form step with `elapsed` seconds since launch
    pub fn advance(&mut self, gravity: f32, elapsed: f32) {
        let next_vy = self.velocity.y - gravity * elapsed;

        self.position.x += self.velocity.x * elapsed;
        self.position.y += self.velocity.y * elapsed + 0.5 * gravity * elapsed * elapsed;
        self.velocity.y = next_vy;
        self.position.z += self.velocity.z * elapsed;
    }

    /// Advance to `now_ms`, then test the tower hit box and the ground
    ///
    /// A hit is only reported while the tower is still standing. Touching the
    /// ground clamps the height to zero and deactivates the projectile.
    pub fn step(
        &mut self,
        now_ms: f64,
        config: &BallisticConfig,
        tower_base: Vec3,
        tower_collapsing: bool,
    ) -> FlightStep {
        let mut step = FlightStep::default();
        if !self.active {
            return step;
        }

        let elapsed = ((now_ms - self.start_ms) / 1000.0) as f32;
        self.advance(config.gravity, elapsed);
        trace!("projectile t={elapsed:.3} position={}", self.position);

        let dx = (self.position.x - tower_base.x).abs();
        let dz = (self.position.z - tower_base.z).abs();
        if dx < config.hit_radius
            && dz < config.hit_radius
            && self.position.y < config.hit_height
            && !tower_collapsing
        {
            debug!("Projectile hit the tower at {}", self.position);
            step.hit_tower = true;
        }

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.active = false;
            debug!("Projectile landed at {}", self.position);
            step.grounded = true;
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_straight_up_has_no_horizontal_velocity() {
        let velocity = initial_velocity(2.5, 90.0, 0.0);
        assert!(velocity.x.abs() < EPS);
        assert!(velocity.z.abs() < EPS);
        assert!((velocity.y - 2.5).abs() < EPS);
    }

    #[test_case(0.0, 0.0, Vec3::new(2.5, 0.0, 0.0) ; "flat")]
    #[test_case(45.0, 0.0, Vec3::new(1.767_767, 1.767_767, 0.0) ; "elevated")]
    #[test_case(45.0, 45.0, Vec3::new(1.25, 1.767_767, 1.25) ; "elevated and turned")]
    fn test_velocity_decomposition(vertical: f32, horizontal: f32, expected: Vec3) {
        assert!(initial_velocity(2.5, vertical, horizontal).abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_launch_starts_at_launch_point() {
        let config = BallisticConfig::default();
        let projectile = Projectile::launch(&config, 100.0);
        assert_eq!(projectile.position, Vec3::new(0.0, 1.0, -1.0));
        assert!(projectile.is_active());
        assert_eq!(projectile.start_ms(), 100.0);
    }

    #[test]
    fn test_advance_uses_total_elapsed() {
        let mut projectile = Projectile {
            position: Vec3::ZERO,
            velocity: Vec3::new(1.0, 2.0, 3.0),
            start_ms: 0.0,
            active: true,
        };
        projectile.advance(0.4, 0.5);

        assert!(projectile.position.abs_diff_eq(Vec3::new(0.5, 1.05, 1.5), EPS));
        assert!((projectile.velocity.y - 1.8).abs() < EPS);

        projectile.advance(0.4, 1.0);
        assert!(projectile.position.abs_diff_eq(Vec3::new(1.5, 3.05, 4.5), EPS));
        assert!((projectile.velocity.y - 1.4).abs() < EPS);
    }

    #[test]
    fn test_ground_contact_clamps_and_stops() {
        let config = BallisticConfig::default();
        let mut projectile = Projectile {
            position: Vec3::new(0.0, 0.1, 0.0),
            velocity: Vec3::new(0.0, -1.0, 0.0),
            start_ms: 0.0,
            active: true,
        };

        let step = projectile.step(1000.0, &config, Vec3::new(50.0, 0.0, 50.0), false);
        assert_eq!(
            step,
            FlightStep {
                hit_tower: false,
                grounded: true
            }
        );
        assert_eq!(projectile.position.y, 0.0);
        assert!(!projectile.is_active());

        assert_eq!(
            projectile.step(2000.0, &config, Vec3::ZERO, false),
            FlightStep::default()
        );
    }

    #[test]
    fn test_hit_requires_standing_tower() {
        let config = BallisticConfig::default();
        let mut projectile = Projectile {
            position: Vec3::new(12.0, 3.0, -6.0),
            velocity: Vec3::ZERO,
            start_ms: 0.0,
            active: true,
        };
        let tower = Vec3::new(12.5, 0.0, -5.5);

        assert!(projectile.step(0.0, &config, tower, false).hit_tower);
        assert!(!projectile.step(0.0, &config, tower, true).hit_tower);
    }

    #[test]
    fn test_too_high_is_not_a_hit() {
        let config = BallisticConfig::default();
        let mut projectile = Projectile {
            position: Vec3::new(12.0, 6.0, -6.0),
            velocity: Vec3::ZERO,
            start_ms: 0.0,
            active: true,
        };
        assert!(
            !projectile
                .step(0.0, &config, Vec3::new(12.0, 0.0, -6.0), false)
                .hit_tower
        );
    }
}
