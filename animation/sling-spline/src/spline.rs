//! Spline data and Catmull-Rom evaluation

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use sling_math::{Quaternion, Vec3};

use crate::error::{Result, SplineError};
use crate::parser::parse_spline;

/// A control point sample on the path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Position in world units
    pub position: Vec3,
    /// Euler rotation in degrees
    pub rotation: Vec3,
}

impl ControlPoint {
    /// Rotation of this point as a quaternion
    pub fn orientation(&self) -> Quaternion {
        Quaternion::from_euler_degrees(self.rotation)
    }
}

/// Interpolated pose on the spline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    pub position: Vec3,
    pub orientation: Quaternion,
    /// Index of the first point of the four-point window
    pub segment: usize,
    /// Parameter within the segment, in `[0, 1]`
    pub local_t: f32,
}

/// An immutable control-point path with a playback duration
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    spline_count: u32,
    duration: f32,
    points: Vec<ControlPoint>,
}

impl Spline {
    /// Build a spline, validating point count and duration
    pub fn new(spline_count: u32, duration: f32, points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < 4 {
            return Err(SplineError::TooFewControlPoints {
                count: points.len(),
            });
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SplineError::InvalidDuration(duration));
        }

        Ok(Self {
            spline_count,
            duration,
            points,
        })
    }

    /// Parse spline text
    pub fn parse(text: &str) -> Result<Self> {
        parse_spline(text)
    }

    /// Read and parse a spline file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let spline = parse_spline(&text)?;
        debug!("Loaded spline from {}: {}", path.display(), spline);
        Ok(spline)
    }

    /// Spline count declared by the file (informational)
    pub fn spline_count(&self) -> u32 {
        self.spline_count
    }

    /// Playback duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of four-point windows
    pub fn segment_count(&self) -> usize {
        self.points.len() - 3
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn first_point(&self) -> &ControlPoint {
        &self.points[0]
    }

    pub fn last_point(&self) -> &ControlPoint {
        &self.points[self.points.len() - 1]
    }

    /// Locate the segment and local parameter for a normalized time
    ///
    /// The time is clamped to `[0, 1]`.
    pub fn locate(&self, normalized_time: f32) -> (usize, f32) {
        let t = normalized_time.clamp(0.0, 1.0);
        let segments = self.segment_count();
        let scaled = t * segments as f32;
        let segment = (scaled.floor() as usize).min(segments - 1);
        (segment, scaled - segment as f32)
    }

    /// Pose at `normalized_time`
    ///
    /// Position blends points `[segment .. segment + 3]`. Orientation is a
    /// SLERP between the two interior points `segment + 1` and `segment + 2`.
    pub fn evaluate(&self, normalized_time: f32) -> SplineSample {
        let (segment, local_t) = self.locate(normalized_time);
        let window = &self.points[segment..segment + 4];

        let position = catmull_rom_point(
            window[0].position,
            window[1].position,
            window[2].position,
            window[3].position,
            local_t,
        );
        let orientation = window[1]
            .orientation()
            .slerp(&window[2].orientation(), local_t);

        SplineSample {
            position,
            orientation,
            segment,
            local_t,
        }
    }
}

impl fmt::Display for Spline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} spline(s), {} control points, {} segments, {:.2}s",
            self.spline_count,
            self.points.len(),
            self.segment_count(),
            self.duration
        )
    }
}

/// Catmull-Rom blend of four points at `t`
///
/// `t` is not clamped; `0` yields `p1` and `1` yields `p2`.
pub fn catmull_rom_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let b0 = -0.5 * t3 + t2 - 0.5 * t;
    let b1 = 1.5 * t3 - 2.5 * t2 + 1.0;
    let b2 = -1.5 * t3 + 2.0 * t2 + 0.5 * t;
    let b3 = 0.5 * t3 - 0.5 * t2;

    p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn point(x: f32, yaw: f32) -> ControlPoint {
        ControlPoint {
            position: Vec3::new(x, x * x, 0.0),
            rotation: Vec3::new(0.0, 0.0, yaw),
        }
    }

    fn line(count: usize) -> Spline {
        let points = (0..count).map(|i| point(i as f32, i as f32 * 10.0)).collect();
        Spline::new(1, 4.0, points).unwrap()
    }

    #[test]
    fn test_catmull_rom_endpoints() {
        let p = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(4.0, 0.0, 0.0),
        ];
        assert!(catmull_rom_point(p[0], p[1], p[2], p[3], 0.0).abs_diff_eq(p[1], EPS));
        assert!(catmull_rom_point(p[0], p[1], p[2], p[3], 1.0).abs_diff_eq(p[2], EPS));
    }

    #[test]
    fn test_catmull_rom_collinear_midpoint() {
        let mid = catmull_rom_point(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            0.5,
        );
        assert!(mid.abs_diff_eq(Vec3::new(1.5, 0.0, 0.0), EPS));
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(line(4).segment_count(), 1);
        assert_eq!(line(7).segment_count(), 4);
    }

    #[test]
    fn test_locate_clamps() {
        let spline = line(7);
        assert_eq!(spline.locate(-1.0), (0, 0.0));
        assert_eq!(spline.locate(1.0), (3, 1.0));
        assert_eq!(spline.locate(5.0), (3, 1.0));

        let (segment, local) = spline.locate(0.375);
        assert_eq!(segment, 1);
        assert!((local - 0.5).abs() < EPS);
    }

    #[test]
    fn test_orientation_uses_interior_points() {
        let spline = line(4);
        let start = spline.evaluate(0.0);
        let end = spline.evaluate(1.0);

        assert!(start.orientation.same_rotation(&spline.points()[1].orientation(), 1e-4));
        assert!(end.orientation.same_rotation(&spline.points()[2].orientation(), 1e-4));
    }

    #[test]
    fn test_too_few_points() {
        let points = (0..3).map(|i| point(i as f32, 0.0)).collect();
        assert!(matches!(
            Spline::new(1, 1.0, points),
            Err(SplineError::TooFewControlPoints { count: 3 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            line(5).to_string(),
            "1 spline(s), 5 control points, 2 segments, 4.00s"
        );
    }
}
