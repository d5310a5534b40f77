//! Application time
//!
//! All editor time values are milliseconds elapsed since the application
//! start epoch. Recorded waypoints, input events and frame ticks share this
//! single time base.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Milliseconds per second
pub const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Nominal frame rate of the playback clock
pub const DEFAULT_FPS: f64 = 60.0;

/// A point in application time, in milliseconds since the start epoch
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn from_secs_f64(seconds: f64) -> Self {
        Self(seconds * MILLIS_PER_SECOND)
    }

    pub const fn as_millis(self) -> f64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 / MILLIS_PER_SECOND
    }

    /// Time elapsed since `earlier`, never negative
    pub fn elapsed_since(self, earlier: Timestamp) -> Timestamp {
        Self((self.0 - earlier.0).max(0.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Clamp into `[min, max]`
    pub fn clamp(self, min: Timestamp, max: Timestamp) -> Timestamp {
        Self(self.0.clamp(min.0, max.0))
    }

    pub fn max(self, other: Timestamp) -> Timestamp {
        Self(self.0.max(other.0))
    }

    pub fn min(self, other: Timestamp) -> Timestamp {
        Self(self.0.min(other.0))
    }
}

/// Duration of one frame at [`DEFAULT_FPS`]
pub const DEFAULT_FRAME_DURATION: Timestamp = Timestamp(MILLIS_PER_SECOND / DEFAULT_FPS);

/// Duration of one frame at `fps`, `None` unless `fps` is positive and finite
pub fn frame_duration(fps: f64) -> Option<Timestamp> {
    if fps.is_finite() && fps > 0.0 {
        Some(Timestamp(MILLIS_PER_SECOND / fps))
    } else {
        None
    }
}

impl Add for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 + rhs.0)
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 - rhs.0)
    }
}

impl From<f64> for Timestamp {
    fn from(millis: f64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
