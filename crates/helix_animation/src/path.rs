//! Track outlines for the canvas overlay

use crate::track::ActorTrack;
use std::fmt::Write;

/// Path data used when there is nothing to outline
pub const EMPTY_PATH: &str = "M 0 0 Z";

/// SVG path data tracing a track's waypoints in order.
///
/// `M x0 y0 L x1 y1 L x2 y2 ...`; an empty track yields [`EMPTY_PATH`].
pub fn track_path(track: &ActorTrack) -> String {
    let mut waypoints = track.waypoints().iter();

    let Some(first) = waypoints.next() else {
        return EMPTY_PATH.to_string();
    };

    let mut path = format!("M {} {}", first.position.x, first.position.y);
    for waypoint in waypoints {
        // Writing into a String cannot fail
        let _ = write!(path, " L {} {}", waypoint.position.x, waypoint.position.y);
    }
    path
}
