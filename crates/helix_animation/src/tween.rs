//! Piecewise-linear tweening over recorded waypoints
//!
//! Recordings are sparse samples of a manual drag, so the position between
//! two samples is a straight line proportional to elapsed time. There is no
//! easing and no extrapolation: before the first waypoint the actor sits at
//! the first position, after the last waypoint at the last position.

use crate::error::TweenError;
use crate::track::Waypoint;
use helix_core::{Point, Timestamp};

/// Position of an actor at `time`, given its time-ordered waypoints.
///
/// - Before (or at) the first waypoint: the first position.
/// - After (or at) the last waypoint: the last position.
/// - At a waypoint's time: that waypoint's position, exactly. With several
///   waypoints at the same interior time, the earliest one wins.
/// - Otherwise: linear interpolation between the bracketing pair.
///
/// Pure and allocation-free; safe to call every frame.
pub fn tween(waypoints: &[Waypoint], time: Timestamp) -> Result<Point, TweenError> {
    let (first, last) = match (waypoints.first(), waypoints.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(TweenError::EmptyWaypointSequence),
    };

    if !time.is_finite() {
        return Err(TweenError::NonFiniteTime(time));
    }

    if time <= first.time {
        return Ok(first.position);
    }
    if time >= last.time {
        return Ok(last.position);
    }

    for pair in waypoints.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);

        if previous.time == time {
            return Ok(previous.position);
        }
        if previous.time < time && time < next.time {
            return interpolate(previous, next, time);
        }
    }

    // Only reachable when the slice is not time-ordered.
    Ok(last.position)
}

fn interpolate(previous: &Waypoint, next: &Waypoint, time: Timestamp) -> Result<Point, TweenError> {
    let span = next.time.as_millis() - previous.time.as_millis();
    if !(span > 0.0 && span.is_finite()) {
        return Err(TweenError::DivisionByZeroInterpolation {
            previous: previous.time,
            next: next.time,
        });
    }

    let ratio = (time.as_millis() - previous.time.as_millis()) / span;
    Ok(previous.position.lerp(next.position, ratio as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(x: f32, y: f32, time: f64) -> Waypoint {
        Waypoint::new(Timestamp::from_millis(time), Point::new(x, y))
    }

    fn at(time: f64) -> Timestamp {
        Timestamp::from_millis(time)
    }

    #[test]
    fn test_tweens_across_a_set_of_values() {
        let positions = [position(0.0, 0.0, 0.0), position(10.0, 0.0, 10.0)];

        assert_eq!(tween(&positions, at(0.0)), Ok(Point::new(0.0, 0.0)));
        assert_eq!(tween(&positions, at(5.0)), Ok(Point::new(5.0, 0.0)));
        assert_eq!(tween(&positions, at(10.0)), Ok(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_tweens_diagonally() {
        let positions = [position(0.0, 0.0, 0.0), position(20.0, 20.0, 10.0)];

        assert_eq!(tween(&positions, at(0.0)), Ok(Point::new(0.0, 0.0)));
        assert_eq!(tween(&positions, at(5.0)), Ok(Point::new(10.0, 10.0)));
        assert_eq!(tween(&positions, at(10.0)), Ok(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        assert_eq!(tween(&[], at(0.0)), Err(TweenError::EmptyWaypointSequence));
    }

    #[test]
    fn test_single_waypoint_holds_everywhere() {
        let positions = [position(3.0, 4.0, 100.0)];
        for time in [-50.0, 0.0, 100.0, 1e9] {
            assert_eq!(tween(&positions, at(time)), Ok(Point::new(3.0, 4.0)));
        }
    }

    #[test]
    fn test_clamps_outside_range() {
        let positions = [
            position(1.0, 1.0, 100.0),
            position(5.0, 9.0, 200.0),
            position(7.0, 2.0, 300.0),
        ];

        assert_eq!(tween(&positions, at(0.0)), Ok(Point::new(1.0, 1.0)));
        assert_eq!(tween(&positions, at(99.9)), Ok(Point::new(1.0, 1.0)));
        assert_eq!(tween(&positions, at(300.1)), Ok(Point::new(7.0, 2.0)));
        assert_eq!(tween(&positions, at(10_000.0)), Ok(Point::new(7.0, 2.0)));
    }

    #[test]
    fn test_exact_match_on_interior_waypoint() {
        let positions = [
            position(0.0, 0.0, 0.0),
            position(3.3, 7.7, 13.0),
            position(50.0, 50.0, 40.0),
        ];
        assert_eq!(tween(&positions, at(13.0)), Ok(Point::new(3.3, 7.7)));
    }

    #[test]
    fn test_picks_the_bracketing_pair() {
        let positions = [
            position(0.0, 0.0, 0.0),
            position(10.0, 0.0, 10.0),
            position(10.0, 30.0, 20.0),
        ];
        assert_eq!(tween(&positions, at(15.0)), Ok(Point::new(10.0, 15.0)));
    }

    #[test]
    fn test_duplicate_interior_times_resolve_to_earliest() {
        let positions = [
            position(0.0, 0.0, 0.0),
            position(4.0, 4.0, 10.0),
            position(8.0, 8.0, 10.0),
            position(20.0, 20.0, 20.0),
        ];
        assert_eq!(tween(&positions, at(10.0)), Ok(Point::new(4.0, 4.0)));
        // Between the duplicate and the next distinct time
        assert_eq!(tween(&positions, at(15.0)), Ok(Point::new(14.0, 14.0)));
    }

    #[test]
    fn test_non_finite_span_is_an_error() {
        let positions = [
            position(0.0, 0.0, f64::NEG_INFINITY),
            position(10.0, 10.0, f64::INFINITY),
        ];
        assert!(matches!(
            tween(&positions, at(0.0)),
            Err(TweenError::DivisionByZeroInterpolation { .. })
        ));
    }

    #[test]
    fn test_non_finite_query_is_an_error() {
        let positions = [position(0.0, 0.0, 0.0)];
        assert!(matches!(
            tween(&positions, at(f64::NAN)),
            Err(TweenError::NonFiniteTime(_))
        ));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let positions = [position(0.0, 0.0, 0.0), position(7.0, 3.0, 9.0)];
        let a = tween(&positions, at(4.2));
        let b = tween(&positions, at(4.2));
        assert_eq!(a, b);
    }
}
