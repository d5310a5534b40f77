//! Animation error types

use helix_core::Timestamp;
use thiserror::Error;

/// Errors raised while computing an interpolated position
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TweenError {
    /// Interpolation needs at least one waypoint
    #[error("cannot tween an empty waypoint sequence")]
    EmptyWaypointSequence,

    /// The waypoints bracketing the query time have no usable time span
    #[error("waypoints at {previous} and {next} have no time span to interpolate across")]
    DivisionByZeroInterpolation { previous: Timestamp, next: Timestamp },

    /// The query time is NaN or infinite
    #[error("cannot tween at non-finite time {0}")]
    NonFiniteTime(Timestamp),
}

/// Errors raised while appending to a track
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TrackError {
    /// Tracks are recorded forward in time only
    #[error("waypoint at {time} is earlier than the last recorded waypoint at {last}")]
    OutOfOrder { last: Timestamp, time: Timestamp },

    /// Waypoint times must be real numbers
    #[error("waypoint time {0} is not finite")]
    NonFiniteTime(Timestamp),
}
