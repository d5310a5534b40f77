//! Behavioural properties of the tween engine
//!
//! These tests check that, over a spread of recorded tracks:
//! - Query times outside a track clamp to its end positions
//! - Query times on a waypoint return that waypoint exactly
//! - Query times between waypoints lie on the straight segment between them
//! - Sampling is a pure function of its inputs

use helix_animation::{sample_animation, tween, ActorTrack, Animation, Waypoint};
use helix_core::{Point, Timestamp};

/// A handful of tracks with distinct shapes: single sample, straight line,
/// zig-zag, and irregular spacing.
fn tracks() -> Vec<Vec<Waypoint>> {
    let w = |time: f64, x: f32, y: f32| Waypoint::new(Timestamp::from_millis(time), Point::new(x, y));

    vec![
        vec![w(42.0, 3.0, 9.0)],
        vec![w(0.0, 0.0, 0.0), w(10.0, 10.0, 0.0)],
        vec![w(0.0, 0.0, 0.0), w(10.0, 20.0, 20.0)],
        vec![
            w(100.0, 0.0, 0.0),
            w(150.0, 50.0, 100.0),
            w(200.0, 100.0, 0.0),
            w(250.0, 150.0, 100.0),
        ],
        vec![
            w(16.0, 150.0, 250.0),
            w(33.0, 151.0, 252.0),
            w(80.0, 190.0, 260.0),
            w(81.0, 191.0, 262.0),
            w(400.0, 200.0, 300.0),
        ],
    ]
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

#[test]
fn test_clamps_before_first_and_after_last() {
    for track in tracks() {
        let first = track[0];
        let last = track[track.len() - 1];

        for offset in [0.0, 0.5, 1.0, 1_000.0] {
            let before = Timestamp::from_millis(first.time.as_millis() - offset);
            let after = Timestamp::from_millis(last.time.as_millis() + offset);

            assert_eq!(tween(&track, before), Ok(first.position));
            assert_eq!(tween(&track, after), Ok(last.position));
        }
    }
}

#[test]
fn test_exact_match_on_every_waypoint() {
    for track in tracks() {
        for waypoint in &track {
            assert_eq!(tween(&track, waypoint.time), Ok(waypoint.position));
        }
    }
}

#[test]
fn test_interpolation_is_linear_between_neighbours() {
    for track in tracks() {
        for pair in track.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let span = b.time.as_millis() - a.time.as_millis();

            for fraction in [0.1, 0.25, 0.5, 0.9] {
                let time = Timestamp::from_millis(a.time.as_millis() + span * fraction);
                let expected = a.position.lerp(b.position, fraction as f32);
                let actual = tween(&track, time).unwrap();

                assert!(
                    close(actual, expected),
                    "at {time}: expected {expected:?}, got {actual:?}"
                );
            }
        }
    }
}

#[test]
fn test_tracks_and_slices_agree() {
    for waypoints in tracks() {
        let track = ActorTrack::from_waypoints(waypoints.clone()).unwrap();
        for millis in [0.0, 20.0, 75.0, 175.0, 300.0] {
            let time = Timestamp::from_millis(millis);
            assert_eq!(track.position_at(time), Some(tween(&waypoints, time)));
        }
    }
}

#[test]
fn test_sampling_is_idempotent() {
    let mut animation = Animation::new("Animation 1");
    for (index, waypoints) in tracks().into_iter().enumerate() {
        let actor = index.to_string().into();
        for waypoint in waypoints {
            animation = animation.with_waypoint(&actor, waypoint).unwrap();
        }
    }

    for millis in [0.0, 12.5, 99.0, 400.0] {
        let elapsed = Timestamp::from_millis(millis);
        let first = sample_animation(&animation, elapsed).unwrap();
        let second = sample_animation(&animation, elapsed).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }
}
