//! Command implementations

pub mod simulate;
pub mod spline;
