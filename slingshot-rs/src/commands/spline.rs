//! Spline file command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use sling_spline::Spline;

use crate::utils::{add_table_row, create_table, format_quaternion, format_vec3};

#[derive(Subcommand)]
pub enum SplineCommands {
    /// Display information about a spline file
    Info {
        /// Path to the spline file
        file: PathBuf,

        /// List every control point
        #[arg(short, long)]
        detailed: bool,
    },

    /// Evaluate a spline across normalized time
    Sample {
        /// Path to the spline file
        file: PathBuf,

        /// Number of intervals between t = 0 and t = 1
        #[arg(short, long, default_value = "10")]
        steps: u32,
    },
}

pub fn execute(cmd: SplineCommands) -> Result<()> {
    match cmd {
        SplineCommands::Info { file, detailed } => handle_info(file, detailed),
        SplineCommands::Sample { file, steps } => handle_sample(file, steps),
    }
}

fn load(path: &Path) -> Result<Spline> {
    Spline::load(path).with_context(|| format!("Failed to load spline from {}", path.display()))
}

fn handle_info(path: PathBuf, detailed: bool) -> Result<()> {
    let spline = load(&path)?;

    println!("=== Spline Information ===");
    println!("File: {}", path.display());
    println!("Declared splines: {}", spline.spline_count());
    println!("Control points: {}", spline.control_point_count());
    println!("Segments: {}", spline.segment_count());
    println!("Duration: {:.3}s", spline.duration());
    println!("Start: {}", format_vec3(spline.first_point().position));
    println!("End: {}", format_vec3(spline.last_point().position));

    if detailed {
        println!();
        let mut table = create_table(vec!["#", "Position", "Rotation (deg)"]);
        for (index, point) in spline.points().iter().enumerate() {
            add_table_row(
                &mut table,
                vec![
                    index.to_string(),
                    format_vec3(point.position),
                    format_vec3(point.rotation),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn handle_sample(path: PathBuf, steps: u32) -> Result<()> {
    if steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    let spline = load(&path)?;
    log::info!("Sampling {spline} in {steps} steps");

    let mut table = create_table(vec!["t", "Segment", "Local t", "Position", "Orientation (w, x, y, z)"]);
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let sample = spline.evaluate(t);
        add_table_row(
            &mut table,
            vec![
                format!("{t:.3}"),
                sample.segment.to_string(),
                format!("{:.3}", sample.local_t),
                format_vec3(sample.position),
                format_quaternion(sample.orientation),
            ],
        );
    }
    table.printstd();

    Ok(())
}
