//! Launch session state machine
//!
//! Launching takes two presses. The first resets the selected bird to the
//! launch point and starts pulling the band back; once the bend reaches its
//! maximum the slingshot waits, drawn. The second press fires: the band snaps
//! forward and the bird's flight starts. All of the per-launch state (phase,
//! bend, active flight and the animation-in-progress latch) lives in one
//! [`LaunchSession`] owned by the scene.

use std::fmt;

use glam::Vec3;
use log::{debug, info};
use sling_spline::SplinePlayback;

use crate::ballistic::Projectile;
use crate::config::SlingshotConfig;
use crate::entity::{Entity, EntityKind};

/// The two interchangeable birds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectileKind {
    /// Follows the loaded spline
    Red,
    /// Flies a ballistic arc
    #[default]
    Blue,
}

impl ProjectileKind {
    pub fn entity(self) -> EntityKind {
        match self {
            Self::Red => EntityKind::RedBird,
            Self::Blue => EntityKind::BlueBird,
        }
    }

    pub fn strategy(self) -> LaunchStrategy {
        match self {
            Self::Red => LaunchStrategy::Spline,
            Self::Blue => LaunchStrategy::Ballistic,
        }
    }
}

impl fmt::Display for ProjectileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Blue => f.write_str("blue"),
        }
    }
}

/// How a fired bird moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    Spline,
    Ballistic,
}

/// Slingshot phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchPhase {
    /// Band at rest, next press starts a pull-back
    #[default]
    Idle,
    /// Bend growing each tick
    PullingBack,
    /// Fully drawn, next press fires
    Drawn,
    /// Bend snapping back each tick
    Firing,
}

/// Bird currently in the air
#[derive(Debug, Clone, Default)]
pub enum Flight {
    #[default]
    None,
    Spline(SplinePlayback),
    Ballistic(Projectile),
}

impl Flight {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Result of a launch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction {
    /// Band started pulling back
    PullBack,
    /// Bird released; the caller starts its flight
    Fire(ProjectileKind),
}

/// What the slingshot did on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlingshotTick {
    Idle,
    /// Pulled back one step
    Pulling,
    /// Pulled back and reached the maximum bend
    Drawn,
    /// Released one step
    Releasing,
    /// Released and reached rest
    Released,
}

#[derive(Debug, Clone, Default)]
pub struct LaunchSession {
    phase: LaunchPhase,
    bend: f32,
    animation_in_progress: bool,
    selected: ProjectileKind,
    pub flight: Flight,
}

impl LaunchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    /// Current band bend, within `[0, max_bend]`
    pub fn bend(&self) -> f32 {
        self.bend
    }

    pub fn selected(&self) -> ProjectileKind {
        self.selected
    }

    /// Whether new launches and selections are currently rejected
    pub fn animation_in_progress(&self) -> bool {
        self.animation_in_progress
    }

    /// Release the in-progress latch
    pub fn finish_animation(&mut self) {
        self.animation_in_progress = false;
    }

    /// Switch birds; ignored while an animation is in progress
    pub fn select(&mut self, kind: ProjectileKind) -> bool {
        if self.animation_in_progress {
            debug!("Ignoring selection of {kind} bird during an animation");
            return false;
        }
        self.selected = kind;
        debug!("Selected {kind} bird");
        true
    }

    /// Handle a launch press for `bird`
    ///
    /// When drawn this fires. From any other phase it resets the bird to
    /// `launch_point` with its original rotation and (re)starts pulling back.
    /// Debouncing on the in-progress latch is the caller's job.
    pub fn request_launch(&mut self, bird: &mut Entity, launch_point: Vec3) -> LaunchAction {
        self.animation_in_progress = true;

        if self.phase == LaunchPhase::Drawn {
            self.phase = LaunchPhase::Firing;
            info!("Firing {} bird", self.selected);
            return LaunchAction::Fire(self.selected);
        }

        bird.reset_pose(launch_point);
        self.phase = LaunchPhase::PullingBack;
        debug!("Pulling back with {} bird", self.selected);
        LaunchAction::PullBack
    }

    /// Advance the band for one tick
    pub fn update(&mut self, bird: &mut Entity, config: &SlingshotConfig) -> SlingshotTick {
        match self.phase {
            LaunchPhase::PullingBack => {
                self.bend += config.pull_step;
                bird.add_position(config.pull_offset);
                if self.bend >= config.max_bend {
                    self.bend = self.bend.min(config.max_bend);
                    self.phase = LaunchPhase::Drawn;
                    self.animation_in_progress = false;
                    debug!("Slingshot drawn");
                    return SlingshotTick::Drawn;
                }
                SlingshotTick::Pulling
            }
            LaunchPhase::Firing => {
                self.bend -= config.release_step;
                if self.bend <= 0.0 {
                    self.bend = 0.0;
                    self.phase = LaunchPhase::Idle;
                    debug!("Slingshot released");
                    return SlingshotTick::Released;
                }
                SlingshotTick::Releasing
            }
            LaunchPhase::Idle | LaunchPhase::Drawn => SlingshotTick::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pose;
    use pretty_assertions::assert_eq;

    fn bird() -> Entity {
        Entity::new(
            EntityKind::BlueBird,
            &Pose::new(Vec3::new(-3.0, 0.0, -2.0), Vec3::new(270.0, 135.0, 0.0), Vec3::ONE),
        )
    }

    const LAUNCH_POINT: Vec3 = Vec3::new(0.0, 1.0, -1.0);

    fn draw(session: &mut LaunchSession, bird: &mut Entity, config: &SlingshotConfig) -> usize {
        let mut ticks = 0;
        while session.update(bird, config) != SlingshotTick::Drawn {
            ticks += 1;
            assert!(ticks < 1000, "never drawn");
        }
        ticks + 1
    }

    #[test]
    fn test_first_press_pulls_back() {
        let mut session = LaunchSession::new();
        let mut bird = bird();
        assert_eq!(
            session.request_launch(&mut bird, LAUNCH_POINT),
            LaunchAction::PullBack
        );
        assert_eq!(session.phase(), LaunchPhase::PullingBack);
        assert!(session.animation_in_progress());
        assert_eq!(bird.position(), LAUNCH_POINT);
    }

    #[test]
    fn test_pull_back_reaches_max_and_releases_latch() {
        let config = SlingshotConfig::default();
        let mut session = LaunchSession::new();
        let mut bird = bird();
        session.request_launch(&mut bird, LAUNCH_POINT);

        let ticks = draw(&mut session, &mut bird, &config);
        assert!((80..=81).contains(&ticks));
        assert_eq!(session.phase(), LaunchPhase::Drawn);
        assert_eq!(session.bend(), 8.0);
        assert!(!session.animation_in_progress());

        // The bird moved back with the band
        let expected = LAUNCH_POINT + config.pull_offset * ticks as f32;
        assert!(bird.position().abs_diff_eq(expected, 1e-4));

        // Drawn is stable until the next press
        assert_eq!(session.update(&mut bird, &config), SlingshotTick::Idle);
    }

    #[test]
    fn test_repeated_presses_while_pulling_never_fire() {
        let config = SlingshotConfig::default();
        let mut session = LaunchSession::new();
        let mut bird = bird();
        session.request_launch(&mut bird, LAUNCH_POINT);

        for _ in 0..10 {
            for _ in 0..5 {
                session.update(&mut bird, &config);
            }
            assert!(session.bend() < 8.0);
            assert_eq!(
                session.request_launch(&mut bird, LAUNCH_POINT),
                LaunchAction::PullBack
            );
            assert_eq!(session.phase(), LaunchPhase::PullingBack);
        }
    }

    #[test]
    fn test_second_press_fires_and_release_returns_to_idle() {
        let config = SlingshotConfig::default();
        let mut session = LaunchSession::new();
        let mut bird = bird();
        session.request_launch(&mut bird, LAUNCH_POINT);
        draw(&mut session, &mut bird, &config);

        assert_eq!(
            session.request_launch(&mut bird, LAUNCH_POINT),
            LaunchAction::Fire(ProjectileKind::Blue)
        );
        assert_eq!(session.phase(), LaunchPhase::Firing);
        assert!(session.animation_in_progress());

        let mut ticks = Vec::new();
        loop {
            let tick = session.update(&mut bird, &config);
            ticks.push(tick);
            if tick == SlingshotTick::Released {
                break;
            }
        }
        assert_eq!(ticks.len(), 8);
        assert_eq!(session.bend(), 0.0);
        assert_eq!(session.phase(), LaunchPhase::Idle);
        // The flight still owns the latch
        assert!(session.animation_in_progress());
    }

    #[test]
    fn test_selection_debounced() {
        let mut session = LaunchSession::new();
        let mut bird = bird();
        assert_eq!(session.selected(), ProjectileKind::Blue);
        assert!(session.select(ProjectileKind::Red));
        assert_eq!(session.selected(), ProjectileKind::Red);

        session.request_launch(&mut bird, LAUNCH_POINT);
        assert!(!session.select(ProjectileKind::Blue));
        assert_eq!(session.selected(), ProjectileKind::Red);

        session.finish_animation();
        assert!(session.select(ProjectileKind::Blue));
    }

    #[test]
    fn test_strategies() {
        assert_eq!(ProjectileKind::Red.strategy(), LaunchStrategy::Spline);
        assert_eq!(ProjectileKind::Blue.strategy(), LaunchStrategy::Ballistic);
        assert_eq!(ProjectileKind::Red.entity(), EntityKind::RedBird);
    }
}
