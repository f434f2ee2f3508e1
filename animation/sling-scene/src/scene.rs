//! Frame-driven scene orchestration
//!
//! The host calls [`Scene::tick`] once per frame with a monotonic millisecond
//! clock, forwards discrete input through [`Scene::handle_input`], and draws
//! with [`Scene::render`]. Everything the UI or audio layer reacts to comes
//! back from those calls as one-shot [`SceneEvent`]s.
//!
//! Per tick, in order:
//! 1. geometry-ready notifications for newly loaded meshes
//! 2. slingshot band update for the selected bird
//! 3. spline or ballistic flight of the fired bird
//! 4. tower and pig fall, once collapsing
//! 5. pig death deformation

use std::fmt;
use std::path::Path;

use glam::{Mat4, Vec3};
use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sling_spline::{PlaybackStatus, Spline, SplinePlayback};

use crate::ballistic::Projectile;
use crate::config::SceneConfig;
use crate::entity::{Entity, EntityKind, MeshKind};
use crate::error::Result;
use crate::launch::{
    Flight, LaunchAction, LaunchSession, LaunchStrategy, ProjectileKind, SlingshotTick,
};
use crate::pig::Pig;
use crate::slingshot::{SlingshotRig, band_bones};
use crate::tower::Tower;

/// Discrete user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pull back, or fire when drawn
    Launch,
    /// Choose which bird the slingshot uses
    Select(ProjectileKind),
}

/// One-shot notifications for the UI, audio and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A mesh finished loading; upload its static data once
    GeometryReady(EntityKind),
    /// A success or failure banner was taken down
    BannerCleared,
    /// The band is fully pulled back and waiting for the fire press
    SlingshotDrawn,
    /// A bird left the slingshot; play the launch sound
    Launched(ProjectileKind),
    TowerCollapseBegins,
    PigDeathBegins,
    ShowSuccess,
    ShowFailure,
    /// A bird's flight ended
    FlightFinished(ProjectileKind),
}

impl fmt::Display for SceneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeometryReady(kind) => write!(f, "geometry ready: {kind}"),
            Self::BannerCleared => f.write_str("banner cleared"),
            Self::SlingshotDrawn => f.write_str("slingshot drawn"),
            Self::Launched(kind) => write!(f, "launched {kind} bird"),
            Self::TowerCollapseBegins => f.write_str("tower collapse begins"),
            Self::PigDeathBegins => f.write_str("pig death begins"),
            Self::ShowSuccess => f.write_str("success"),
            Self::ShowFailure => f.write_str("failure"),
            Self::FlightFinished(kind) => write!(f, "{kind} bird flight finished"),
        }
    }
}

/// Banner currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    #[default]
    None,
    Success,
    Failure,
}

/// A mesh to draw with its model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub model_matrix: Mat4,
}

/// Receiver for everything the renderer needs each frame
pub trait RenderSink {
    fn draw(&mut self, call: DrawCall);

    /// Bone matrices for the skinned band
    fn band_bones(&mut self, _bones: &[Mat4; 3]) {}

    /// Pig deformation amount and centre
    fn pig_deform(&mut self, _amount: f32, _position: Vec3) {}
}

/// Collects draw calls into a list
impl RenderSink for Vec<DrawCall> {
    fn draw(&mut self, call: DrawCall) {
        self.push(call);
    }
}

/// The whole slingshot scene
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    red: Entity,
    blue: Entity,
    slingshot: SlingshotRig,
    tower: Tower,
    session: LaunchSession,
    spline: Option<Spline>,
    banner: Banner,
    rng: StdRng,
}

impl Scene {
    /// Build a scene seeded from the operating system
    pub fn new(config: SceneConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Build a scene with a reproducible collapse
    pub fn with_seed(config: SceneConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SceneConfig, rng: StdRng) -> Result<Self> {
        let tower = Tower::new(&config.tower)?.with_pig(Pig::new(&config.pig));
        let slingshot = SlingshotRig::new(&config.slingshot.pose)?;

        info!(
            "Scene ready: tower of {} at {}, pig at {}",
            config.tower.height, config.tower.position, config.pig.pose.position
        );

        Ok(Self {
            red: Entity::new(EntityKind::RedBird, &config.birds.red),
            blue: Entity::new(EntityKind::BlueBird, &config.birds.blue),
            slingshot,
            tower,
            session: LaunchSession::new(),
            spline: None,
            banner: Banner::None,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Change the ballistic launch angles used by the next fire
    pub fn set_launch_angles(&mut self, vertical_deg: f32, horizontal_deg: f32) {
        self.config.ballistic.vertical_angle = vertical_deg;
        self.config.ballistic.horizontal_angle = horizontal_deg;
    }

    pub fn session(&self) -> &LaunchSession {
        &self.session
    }

    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    pub fn pig(&self) -> Option<&Pig> {
        self.tower.pig()
    }

    pub fn slingshot(&self) -> &SlingshotRig {
        &self.slingshot
    }

    pub fn banner(&self) -> Banner {
        self.banner
    }

    pub fn spline(&self) -> Option<&Spline> {
        self.spline.as_ref()
    }

    pub fn entity(&self, kind: EntityKind) -> Option<&Entity> {
        match kind {
            EntityKind::RedBird => Some(&self.red),
            EntityKind::BlueBird => Some(&self.blue),
            EntityKind::Pig => self.tower.pig().map(|pig| &pig.entity),
        }
    }

    pub fn entity_mut(&mut self, kind: EntityKind) -> Option<&mut Entity> {
        match kind {
            EntityKind::RedBird => Some(&mut self.red),
            EntityKind::BlueBird => Some(&mut self.blue),
            EntityKind::Pig => self.tower.pig_mut().map(|pig| &mut pig.entity),
        }
    }

    pub fn bird(&self, kind: ProjectileKind) -> &Entity {
        match kind {
            ProjectileKind::Red => &self.red,
            ProjectileKind::Blue => &self.blue,
        }
    }

    /// Called by the mesh loader once an entity's geometry is available
    pub fn mark_loaded(&mut self, kind: EntityKind) {
        if let Some(entity) = self.entity_mut(kind) {
            entity.mark_loaded();
            debug!("{kind} mesh loaded");
        }
    }

    /// Use `spline` for the red bird's flight
    pub fn set_spline(&mut self, spline: Spline) {
        info!("Spline loaded: {spline}");
        self.spline = Some(spline);
    }

    /// Load the red bird's spline from a file
    ///
    /// On failure the error is logged and returned, and spline flights stay
    /// unavailable until a spline loads.
    pub fn load_spline<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Spline::load(path) {
            Ok(spline) => {
                self.set_spline(spline);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to load spline {}: {err}", path.display());
                self.spline = None;
                Err(err.into())
            }
        }
    }

    /// Route one input event; everything is ignored while a launch animates
    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) -> Vec<SceneEvent> {
        if self.session.animation_in_progress() {
            debug!("Ignoring {event:?} while an animation is in progress");
            return Vec::new();
        }

        match event {
            InputEvent::Launch => self.launch_slingshot(now_ms),
            InputEvent::Select(kind) => {
                self.session.select(kind);
                Vec::new()
            }
        }
    }

    /// Press the launch control without the in-progress check
    pub fn launch_slingshot(&mut self, now_ms: f64) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        let kind = self.session.selected();
        let launch_point = self.config.ballistic.launch_point;
        let bird = bird_mut(&mut self.red, &mut self.blue, kind);

        if let LaunchAction::Fire(kind) = self.session.request_launch(bird, launch_point) {
            events.push(SceneEvent::Launched(kind));
            self.start_flight(kind, now_ms);
        }
        events
    }

    fn start_flight(&mut self, kind: ProjectileKind, now_ms: f64) {
        match kind.strategy() {
            LaunchStrategy::Spline => {
                let Some(spline) = self.spline.as_ref() else {
                    warn!("No spline loaded; {kind} bird stays put");
                    self.session.finish_animation();
                    return;
                };
                self.red.reset_pose(spline.first_point().position);
                let mut playback = SplinePlayback::new();
                playback.start(now_ms);
                self.session.flight = Flight::Spline(playback);
                info!("Starting spline flight");
            }
            LaunchStrategy::Ballistic => {
                let projectile = Projectile::launch(&self.config.ballistic, now_ms);
                self.blue.transform.position = projectile.position;
                self.session.flight = Flight::Ballistic(projectile);
                info!("Starting ballistic flight");
            }
        }
    }

    /// Knock the tower over, as a direct trigger or on impact
    pub fn collapse_tower(&mut self, now_ms: f64) -> Vec<SceneEvent> {
        if self.tower.collapse(now_ms, &mut self.rng) {
            vec![SceneEvent::TowerCollapseBegins]
        } else {
            Vec::new()
        }
    }

    /// Advance the scene to `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Vec<SceneEvent> {
        let mut events = Vec::new();

        for kind in EntityKind::ALL {
            if self.entity_mut(kind).is_some_and(Entity::take_ready) {
                events.push(SceneEvent::GeometryReady(kind));
            }
        }

        self.update_slingshot(&mut events);
        self.update_flight(now_ms, &mut events);

        if self.tower.is_collapsing()
            && let Err(err) = self.tower.update(now_ms)
        {
            warn!("Tower update failed: {err}");
        }

        if let Some(pig) = self.tower.pig_mut() {
            pig.update_deform();
        }

        if !events.is_empty() {
            trace!("tick {now_ms:.1}ms: {events:?}");
        }
        events
    }

    fn update_slingshot(&mut self, events: &mut Vec<SceneEvent>) {
        let kind = self.session.selected();
        let bird = bird_mut(&mut self.red, &mut self.blue, kind);

        match self.session.update(bird, &self.config.slingshot) {
            tick @ (SlingshotTick::Pulling | SlingshotTick::Drawn) => {
                if self.banner != Banner::None {
                    self.banner = Banner::None;
                    events.push(SceneEvent::BannerCleared);
                }
                if let Some(pig) = self.tower.pig_mut() {
                    pig.revive();
                }
                if tick == SlingshotTick::Drawn {
                    events.push(SceneEvent::SlingshotDrawn);
                }
            }
            SlingshotTick::Released => self.kill_pig(events),
            SlingshotTick::Idle | SlingshotTick::Releasing => {}
        }
    }

    fn update_flight(&mut self, now_ms: f64, events: &mut Vec<SceneEvent>) {
        match &mut self.session.flight {
            Flight::None => {}
            Flight::Spline(playback) => {
                let Some(spline) = self.spline.as_ref() else {
                    return;
                };
                if !self.red.is_loaded() {
                    return;
                }
                if playback.advance_to(spline, &mut self.red.transform, now_ms)
                    == PlaybackStatus::Finished
                {
                    self.end_flight(ProjectileKind::Red, events);
                    self.show_banner(Banner::Failure, events);
                }
            }
            Flight::Ballistic(projectile) => {
                if !self.blue.is_loaded() {
                    return;
                }
                let step = projectile.step(
                    now_ms,
                    &self.config.ballistic,
                    self.tower.position(),
                    self.tower.is_collapsing(),
                );
                self.blue.transform.position = projectile.position;

                if step.hit_tower {
                    events.extend(self.collapse_tower(now_ms));
                    self.kill_pig(events);
                    self.show_banner(Banner::Success, events);
                }
                if step.grounded {
                    self.end_flight(ProjectileKind::Blue, events);
                    if self.banner != Banner::Success && !self.tower.is_collapsing() {
                        self.show_banner(Banner::Failure, events);
                    }
                }
            }
        }
    }

    fn end_flight(&mut self, kind: ProjectileKind, events: &mut Vec<SceneEvent>) {
        self.session.flight = Flight::None;
        self.session.finish_animation();
        events.push(SceneEvent::FlightFinished(kind));
    }

    fn kill_pig(&mut self, events: &mut Vec<SceneEvent>) {
        if self.tower.pig_mut().is_some_and(Pig::kill) {
            events.push(SceneEvent::PigDeathBegins);
        }
    }

    fn show_banner(&mut self, banner: Banner, events: &mut Vec<SceneEvent>) {
        if self.banner == banner {
            return;
        }
        self.banner = banner;
        match banner {
            Banner::Success => {
                info!("Tower hit");
                events.push(SceneEvent::ShowSuccess);
            }
            Banner::Failure => {
                info!("Missed");
                events.push(SceneEvent::ShowFailure);
            }
            Banner::None => events.push(SceneEvent::BannerCleared),
        }
    }

    /// Submit this frame's draw calls
    ///
    /// Entities whose mesh has not loaded yet are skipped.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        self.tower.hierarchy().traverse(|_, _, world| {
            sink.draw(DrawCall {
                mesh: MeshKind::TowerBlock,
                model_matrix: world,
            });
        });

        for bird in [&self.red, &self.blue] {
            if bird.is_loaded() {
                sink.draw(DrawCall {
                    mesh: bird.kind().mesh(),
                    model_matrix: bird.model_matrix(),
                });
            }
        }

        if let Some(pig) = self.tower.pig()
            && pig.entity.is_loaded()
        {
            sink.pig_deform(pig.deform(), pig.entity.position());
            sink.draw(DrawCall {
                mesh: MeshKind::Pig,
                model_matrix: pig.entity.model_matrix(),
            });
        }

        let bend = self.session.bend();
        sink.band_bones(&band_bones(bend));
        for (part, matrix) in self.slingshot.part_matrices(bend) {
            sink.draw(DrawCall {
                mesh: part.mesh(),
                model_matrix: matrix,
            });
        }
    }
}

fn bird_mut<'a>(red: &'a mut Entity, blue: &'a mut Entity, kind: ProjectileKind) -> &'a mut Entity {
    match kind {
        ProjectileKind::Red => red,
        ProjectileKind::Blue => blue,
    }
}
