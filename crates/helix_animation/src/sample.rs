//! Per-frame pose sampling

use crate::animation::Animation;
use crate::error::TweenError;
use crate::track::ActorId;
use crate::tween::tween;
use helix_core::{Point, Timestamp};
use serde::Serialize;
use smallvec::SmallVec;

/// Where one actor is at a sampled instant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActorPose {
    pub actor: ActorId,
    pub position: Point,
}

/// Poses of every recorded actor at one instant, in track order
pub type Poses = SmallVec<[ActorPose; 4]>;

/// Positions of all recorded actors `elapsed` into `animation`'s playback.
///
/// Elapsed time is measured from [`Animation::origin`]. Actors whose track
/// is empty have nothing to render and are skipped.
pub fn sample_animation(animation: &Animation, elapsed: Timestamp) -> Result<Poses, TweenError> {
    let time = animation.origin() + elapsed;

    animation
        .actors
        .iter()
        .filter(|(_, track)| !track.is_empty())
        .map(|(actor, track)| {
            Ok(ActorPose {
                actor: actor.clone(),
                position: tween(track.waypoints(), time)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{ActorTrack, Waypoint};

    fn waypoint(time: f64, x: f32, y: f32) -> Waypoint {
        Waypoint::new(Timestamp::from_millis(time), Point::new(x, y))
    }

    #[test]
    fn test_samples_relative_to_origin() {
        let animation = Animation::recording_from("rec", Timestamp::from_millis(250.0))
            .with_waypoint(&"0".into(), waypoint(300.0, 150.0, 250.0))
            .unwrap()
            .with_waypoint(&"0".into(), waypoint(400.0, 200.0, 300.0))
            .unwrap();

        // 100ms into playback is t=350, halfway between the waypoints
        let poses = sample_animation(&animation, Timestamp::from_millis(100.0)).unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0].actor.as_str(), "0");
        assert_eq!(poses[0].position, Point::new(175.0, 275.0));

        // Before the first waypoint the actor holds its first position
        let poses = sample_animation(&animation, Timestamp::zero()).unwrap();
        assert_eq!(poses[0].position, Point::new(150.0, 250.0));
    }

    #[test]
    fn test_skips_empty_tracks() {
        let mut animation = Animation::new("partial")
            .with_waypoint(&"1".into(), waypoint(0.0, 1.0, 1.0))
            .unwrap();
        animation.actors.insert("0".into(), ActorTrack::new());

        let poses = sample_animation(&animation, Timestamp::zero()).unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0].actor.as_str(), "1");
    }
}
