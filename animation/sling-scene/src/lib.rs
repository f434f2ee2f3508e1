//! Frame-driven core of the slingshot scene
//!
//! This crate provides:
//! - An index arena of rigid transforms ([`Hierarchy`]) shared by the
//!   slingshot rig and the tower
//! - Closed-form ballistic flight with tower and ground detection
//! - A tower that collapses once, top block first, carrying the pig with it
//! - The two-press pull-back / fire launch state machine
//! - [`Scene`], which runs all of it from a millisecond clock
//!
//! # Example
//!
//! ```rust
//! use sling_scene::{EntityKind, InputEvent, LaunchPhase, Scene, SceneConfig, SceneEvent};
//!
//! let mut scene = Scene::with_seed(SceneConfig::default(), 7)?;
//! for kind in EntityKind::ALL {
//!     scene.mark_loaded(kind);
//! }
//!
//! let mut now = 0.0;
//! scene.handle_input(InputEvent::Launch, now);
//! while scene.session().phase() != LaunchPhase::Drawn {
//!     now += 16.0;
//!     scene.tick(now);
//! }
//!
//! let events = scene.handle_input(InputEvent::Launch, now);
//! assert!(matches!(events[0], SceneEvent::Launched(_)));
//! # Ok::<(), sling_scene::SceneError>(())
//! ```

pub mod ballistic;
pub mod config;
pub mod entity;
pub mod error;
pub mod hierarchy;
pub mod launch;
pub mod pig;
pub mod scene;
pub mod slingshot;
pub mod tower;

pub use ballistic::{FlightStep, Projectile, initial_velocity};
pub use config::{
    BallisticConfig, BirdsConfig, PigConfig, Pose, SceneConfig, SlingshotConfig, TowerConfig,
};
pub use entity::{Entity, EntityKind, MeshKind};
pub use error::{Result, SceneError};
pub use hierarchy::{Hierarchy, Node, NodeId};
pub use launch::{
    Flight, LaunchAction, LaunchPhase, LaunchSession, LaunchStrategy, ProjectileKind,
    SlingshotTick,
};
pub use pig::Pig;
pub use scene::{Banner, DrawCall, InputEvent, RenderSink, Scene, SceneEvent};
pub use slingshot::{RigPart, SlingshotRig, band_bones, band_offset};
pub use tower::{Block, FallMotion, Tower, TowerState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
