use std::io;
use thiserror::Error;

use sling_spline::SplineError;

/// Error types for scene setup
#[derive(Error, Debug)]
pub enum SceneError {
    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be deserialized
    #[error("Invalid scene configuration: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Spline resource failed to load
    #[error("Spline error: {0}")]
    Spline(#[from] SplineError),

    /// Node index does not exist in the hierarchy
    #[error("Unknown hierarchy node: {0}")]
    UnknownNode(usize),
}

/// Result type using SceneError
pub type Result<T> = std::result::Result<T, SceneError>;
