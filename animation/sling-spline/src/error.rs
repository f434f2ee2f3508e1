use std::io;
use thiserror::Error;

/// Error types for spline loading
#[derive(Error, Debug)]
pub enum SplineError {
    /// I/O error while reading a spline file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before a required record
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A numeric field could not be parsed
    #[error("Invalid number on line {line}: '{value}'")]
    InvalidNumber { line: usize, value: String },

    /// A vector line did not hold exactly three fields
    #[error("Invalid vector on line {line}: expected 3 comma-separated values, found {found}")]
    InvalidVector { line: usize, found: usize },

    /// Catmull-Rom needs a four-point window
    #[error("Spline needs at least 4 control points, got {count}")]
    TooFewControlPoints { count: usize },

    /// Playback duration must be finite and positive
    #[error("Invalid animation duration: {0}")]
    InvalidDuration(f32),
}

/// Result type using SplineError
pub type Result<T> = std::result::Result<T, SplineError>;
