//! Headless launch simulation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use sling_scene::{
    EntityKind, InputEvent, LaunchPhase, ProjectileKind, Scene, SceneConfig, TowerState,
};

use crate::utils::format_vec3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Projectile {
    /// Ballistic arc
    Blue,
    /// Follows the spline file
    Red,
}

impl From<Projectile> for ProjectileKind {
    fn from(value: Projectile) -> Self {
        match value {
            Projectile::Blue => Self::Blue,
            Projectile::Red => Self::Red,
        }
    }
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Scene configuration (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Spline file for the red bird
    #[arg(short, long)]
    pub spline: Option<PathBuf>,

    /// Bird to launch
    #[arg(short, long, value_enum, default_value = "blue")]
    pub projectile: Projectile,

    /// Frame rate of the simulated clock
    #[arg(long, default_value = "60")]
    pub fps: f64,

    /// Stop after this many simulated seconds
    #[arg(long, default_value = "10")]
    pub seconds: f64,

    /// Seed for the collapse impulses
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the ballistic vertical launch angle (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub vertical_angle: Option<f32>,

    /// Override the ballistic horizontal launch angle (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub horizontal_angle: Option<f32>,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number");
    }

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene config from {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(angle) = args.vertical_angle {
        config.ballistic.vertical_angle = angle;
    }
    if let Some(angle) = args.horizontal_angle {
        config.ballistic.horizontal_angle = angle;
    }

    let mut scene = match args.seed {
        Some(seed) => Scene::with_seed(config, seed),
        None => Scene::new(config),
    }
    .context("Failed to build scene")?;

    if let Some(path) = &args.spline {
        scene
            .load_spline(path)
            .with_context(|| format!("Failed to load spline from {}", path.display()))?;
    }

    let kind = ProjectileKind::from(args.projectile);
    scene.handle_input(InputEvent::Select(kind), 0.0);
    for entity in EntityKind::ALL {
        scene.mark_loaded(entity);
    }

    let frame_ms = 1000.0 / args.fps;
    let end_ms = args.seconds * 1000.0;
    info!("Simulating {kind} bird at {} fps for up to {}s", args.fps, args.seconds);

    let mut now = 0.0;
    let mut fired = false;
    print_events(now, &scene.handle_input(InputEvent::Launch, now));

    while now < end_ms {
        now += frame_ms;
        print_events(now, &scene.tick(now));

        if !fired && scene.session().phase() == LaunchPhase::Drawn {
            fired = true;
            debug!("Slingshot drawn at {now:.1} ms, firing");
            print_events(now, &scene.handle_input(InputEvent::Launch, now));
        }

        if fired
            && !scene.session().animation_in_progress()
            && scene.tower().state() != TowerState::Collapsing
        {
            break;
        }
    }

    println!();
    println!("=== Simulation Summary ===");
    println!("Elapsed: {:.1} ms", now);
    println!("Banner: {:?}", scene.banner());
    println!("Tower: {:?}", scene.tower().state());
    println!("{} bird at {}", kind, format_vec3(scene.bird(kind).position()));
    if scene.session().animation_in_progress() {
        println!("Flight still in progress when the clock ran out");
    }

    Ok(())
}

fn print_events(now: f64, events: &[sling_scene::SceneEvent]) {
    for event in events {
        println!("{now:>10.1} ms  {event}");
    }
}
