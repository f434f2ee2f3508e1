//! Text format reader for spline files
//!
//! The format is line oriented:
//!
//! ```text
//! <spline count>
//! <control point count N>
//! <duration in seconds>
//! <x, y, z>      position of point 1
//! <rx, ry, rz>   rotation of point 1 (degrees)
//! ...            N pairs in total
//! ```
//!
//! Blank lines and lines starting with `#` are skipped wherever they appear.

use std::str::FromStr;

use log::trace;
use sling_math::Vec3;

use crate::error::{Result, SplineError};
use crate::spline::{ControlPoint, Spline};

/// Iterator over meaningful records, skipping blanks and comments
struct Records<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    /// Next record as `(1-based line number, trimmed text)`
    fn next_record(&mut self, expected: &'static str) -> Result<(usize, &'a str)> {
        for (index, raw) in self.lines.by_ref() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok((index + 1, line));
        }
        Err(SplineError::UnexpectedEof { expected })
    }

    fn scalar<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        let (line, text) = self.next_record(expected)?;
        parse_number(line, text)
    }

    fn vector(&mut self, expected: &'static str) -> Result<Vec3> {
        let (line, text) = self.next_record(expected)?;
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(SplineError::InvalidVector {
                line,
                found: fields.len(),
            });
        }
        Ok(Vec3::new(
            parse_number(line, fields[0])?,
            parse_number(line, fields[1])?,
            parse_number(line, fields[2])?,
        ))
    }
}

fn parse_number<T: FromStr>(line: usize, text: &str) -> Result<T> {
    text.parse().map_err(|_| SplineError::InvalidNumber {
        line,
        value: text.to_string(),
    })
}

const MAX_PREALLOCATED_POINTS: usize = 1024;

/// Parse spline text into a validated [`Spline`]
pub fn parse_spline(text: &str) -> Result<Spline> {
    let mut records = Records::new(text);

    let spline_count: u32 = records.scalar("spline count")?;
    let point_count: usize = records.scalar("control point count")?;
    let duration: f32 = records.scalar("animation duration")?;

    // Reject before reading points so short files report the real problem
    if point_count < 4 {
        return Err(SplineError::TooFewControlPoints { count: point_count });
    }

    // The declared count is untrusted; a short file ends in UnexpectedEof
    let mut points = Vec::with_capacity(point_count.min(MAX_PREALLOCATED_POINTS));
    for index in 0..point_count {
        let position = records.vector("control point position")?;
        let rotation = records.vector("control point rotation")?;
        trace!("control point {index}: position {position}, rotation {rotation}");
        points.push(ControlPoint { position, rotation });
    }

    Spline::new(spline_count, duration, points)
}
