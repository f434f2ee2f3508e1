//! Control-point splines for scripted flight paths
//!
//! This crate provides:
//! - A reader for the line-oriented spline file format
//! - Catmull-Rom position evaluation with SLERPed orientation
//! - [`SplinePlayback`], a time-normalized driver for a [`sling_math::Transform`]
//!
//! # Example
//!
//! ```rust
//! use sling_spline::Spline;
//!
//! let text = "1\n4\n2.0\n0,0,0\n0,0,0\n1,0,0\n0,0,0\n2,0,0\n0,0,0\n3,0,0\n0,0,0\n";
//! let spline = Spline::parse(text)?;
//! let sample = spline.evaluate(0.5);
//! assert!(sample.position.x > 1.0 && sample.position.x < 2.0);
//! # Ok::<(), sling_spline::SplineError>(())
//! ```

pub mod error;
pub mod parser;
pub mod playback;
pub mod spline;

pub use error::{Result, SplineError};
pub use parser::parse_spline;
pub use playback::{PlaybackStatus, SplinePlayback};
pub use spline::{ControlPoint, Spline, SplineSample, catmull_rom_point};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
