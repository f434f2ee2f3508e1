//! Time-normalized spline playback
//!
//! Drives a [`Transform`] along a [`Spline`]. While playing, the transform is
//! switched to quaternion mode and fed the interpolated pose each tick. When
//! the normalized time reaches 1 the transform snaps to the last control
//! point, goes back to Euler mode and playback stops.

use log::{debug, trace};
use sling_math::{RotationMode, Transform};

use crate::spline::Spline;

/// Outcome of one playback tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No animation running
    Inactive,
    /// Pose was updated and playback continues
    Playing,
    /// Playback reached the end on this tick
    Finished,
}

/// Playback state for one spline-driven entity
#[derive(Debug, Clone, Default)]
pub struct SplinePlayback {
    start_ms: f64,
    active: bool,
}

impl SplinePlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playback at clock time `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.active = true;
    }

    /// Stop without touching the transform
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Clock time playback started at
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Advance using the clock time of the current frame
    pub fn advance_to(
        &mut self,
        spline: &Spline,
        transform: &mut Transform,
        now_ms: f64,
    ) -> PlaybackStatus {
        let elapsed_seconds = ((now_ms - self.start_ms) / 1000.0) as f32;
        self.advance(spline, transform, elapsed_seconds)
    }

    /// Advance to `elapsed_seconds` since the start of playback
    pub fn advance(
        &mut self,
        spline: &Spline,
        transform: &mut Transform,
        elapsed_seconds: f32,
    ) -> PlaybackStatus {
        if !self.active {
            return PlaybackStatus::Inactive;
        }

        let normalized_time = elapsed_seconds / spline.duration();

        if normalized_time >= 1.0 {
            transform.position = spline.last_point().position;
            transform.set_mode(RotationMode::Euler);
            self.active = false;
            debug!("Spline playback finished after {elapsed_seconds:.3}s");
            return PlaybackStatus::Finished;
        }

        let sample = spline.evaluate(normalized_time);
        transform.position = sample.position;
        transform.set_quaternion(sample.orientation);
        trace!(
            "spline t={normalized_time:.3} segment={} position={}",
            sample.segment, sample.position
        );

        PlaybackStatus::Playing
    }
}
