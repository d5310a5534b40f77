//! Waypoints and per-actor tracks

use crate::error::TrackError;
use helix_core::{Point, Timestamp};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of an actor on the canvas (`"0"`, `"1"`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ActorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ActorId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A timestamped position sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub time: Timestamp,
    pub position: Point,
}

impl Waypoint {
    pub const fn new(time: Timestamp, position: Point) -> Self {
        Self { time, position }
    }
}

/// The waypoint history of one actor within one animation.
///
/// Waypoints are ordered by time; times never decrease. The only way to add
/// a waypoint is `push`, which appends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct ActorTrack {
    waypoints: Vec<Waypoint>,
}

impl ActorTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from existing waypoints, checking their order.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Result<Self, TrackError> {
        let mut track = Self {
            waypoints: Vec::with_capacity(waypoints.len()),
        };
        for waypoint in waypoints {
            track.push(waypoint)?;
        }
        Ok(track)
    }

    /// Append a waypoint.
    ///
    /// Equal times are accepted; a time earlier than the last waypoint's is
    /// rejected and the track is left unchanged.
    pub fn push(&mut self, waypoint: Waypoint) -> Result<(), TrackError> {
        if !waypoint.time.is_finite() {
            return Err(TrackError::NonFiniteTime(waypoint.time));
        }
        if let Some(last) = self.waypoints.last() {
            if waypoint.time < last.time {
                return Err(TrackError::OutOfOrder {
                    last: last.time,
                    time: waypoint.time,
                });
            }
        }
        self.waypoints.push(waypoint);
        Ok(())
    }

    /// Copy of this track with one more waypoint
    pub fn with_waypoint(&self, waypoint: Waypoint) -> Result<Self, TrackError> {
        let mut next = self.clone();
        next.push(waypoint)?;
        Ok(next)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Times of the first and last waypoints
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        Some((self.first()?.time, self.last()?.time))
    }

    /// Interpolated position at `time`, `None` for an empty track
    pub fn position_at(&self, time: Timestamp) -> Option<Result<Point, crate::TweenError>> {
        if self.is_empty() {
            return None;
        }
        Some(crate::tween(&self.waypoints, time))
    }
}

impl TryFrom<Vec<Waypoint>> for ActorTrack {
    type Error = TrackError;

    fn try_from(waypoints: Vec<Waypoint>) -> Result<Self, Self::Error> {
        Self::from_waypoints(waypoints)
    }
}

impl From<ActorTrack> for Vec<Waypoint> {
    fn from(track: ActorTrack) -> Self {
        track.waypoints
    }
}
