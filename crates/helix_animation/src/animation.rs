//! Named animations

use crate::error::TrackError;
use crate::track::{ActorId, ActorTrack, Waypoint};
use helix_core::Timestamp;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named collection of per-actor tracks recorded in one session.
///
/// `started_at`/`finished_at` bound the recording session that produced the
/// animation, when there was one. Tracks appear in the order actors were
/// first recorded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub name: String,
    #[serde(default)]
    pub actors: IndexMap<ActorId, ActorTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// An animation whose recording session starts at `time`
    pub fn recording_from(name: impl Into<String>, time: Timestamp) -> Self {
        Self {
            name: name.into(),
            started_at: Some(time),
            ..Default::default()
        }
    }

    pub fn track(&self, actor: &str) -> Option<&ActorTrack> {
        self.actors.get(actor)
    }

    /// Copy of this animation with `waypoint` appended to `actor`'s track.
    ///
    /// The track is created on first use.
    pub fn with_waypoint(&self, actor: &ActorId, waypoint: Waypoint) -> Result<Self, TrackError> {
        let track = match self.actors.get(actor) {
            Some(track) => track.with_waypoint(waypoint)?,
            None => ActorTrack::from_waypoints(vec![waypoint])?,
        };

        let mut next = self.clone();
        next.actors.insert(actor.clone(), track);
        Ok(next)
    }

    /// Copy of this animation with the session closed at `time`.
    pub fn finished(&self, time: Timestamp) -> Self {
        Self {
            finished_at: Some(time),
            ..self.clone()
        }
    }

    /// True when no actor has a waypoint
    pub fn is_empty(&self) -> bool {
        self.actors.values().all(ActorTrack::is_empty)
    }

    /// Number of waypoints across all tracks
    pub fn waypoint_count(&self) -> usize {
        self.actors.values().map(ActorTrack::len).sum()
    }

    fn earliest_waypoint(&self) -> Option<Timestamp> {
        self.actors
            .values()
            .filter_map(|track| track.first().map(|w| w.time))
            .reduce(Timestamp::min)
    }

    fn latest_waypoint(&self) -> Option<Timestamp> {
        self.actors
            .values()
            .filter_map(|track| track.last().map(|w| w.time))
            .reduce(Timestamp::max)
    }

    /// Application time that playback elapsed time is measured from.
    ///
    /// The session start if recorded, else the earliest waypoint, else zero.
    pub fn origin(&self) -> Timestamp {
        self.started_at
            .or_else(|| self.earliest_waypoint())
            .unwrap_or_default()
    }

    /// Playback length: from the origin to the latest waypoint.
    pub fn duration(&self) -> Timestamp {
        self.latest_waypoint()
            .map(|latest| latest.elapsed_since(self.origin()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::Point;

    fn waypoint(time: f64, x: f32, y: f32) -> Waypoint {
        Waypoint::new(Timestamp::from_millis(time), Point::new(x, y))
    }

    #[test]
    fn test_with_waypoint_creates_track_on_first_use() {
        let animation = Animation::new("Animation 1");
        let actor = ActorId::from("0");

        let updated = animation.with_waypoint(&actor, waypoint(300.0, 150.0, 250.0)).unwrap();

        assert!(animation.track("0").is_none());
        assert_eq!(updated.track("0").map(ActorTrack::len), Some(1));
    }

    #[test]
    fn test_with_waypoint_preserves_other_tracks() {
        let animation = Animation::new("Animation 1")
            .with_waypoint(&"0".into(), waypoint(0.0, 0.0, 0.0))
            .unwrap()
            .with_waypoint(&"1".into(), waypoint(5.0, 1.0, 1.0))
            .unwrap()
            .with_waypoint(&"0".into(), waypoint(10.0, 2.0, 2.0))
            .unwrap();

        assert_eq!(animation.track("0").map(ActorTrack::len), Some(2));
        assert_eq!(animation.track("1").map(ActorTrack::len), Some(1));
        assert_eq!(animation.waypoint_count(), 3);

        let order: Vec<&str> = animation.actors.keys().map(ActorId::as_str).collect();
        assert_eq!(order, vec!["0", "1"]);
    }

    #[test]
    fn test_origin_and_duration() {
        let empty = Animation::new("empty");
        assert!(empty.is_empty());
        assert_eq!(empty.origin(), Timestamp::zero());
        assert_eq!(empty.duration(), Timestamp::zero());

        let recorded = Animation::recording_from("rec", Timestamp::from_millis(250.0))
            .with_waypoint(&"0".into(), waypoint(300.0, 0.0, 0.0))
            .unwrap()
            .with_waypoint(&"0".into(), waypoint(400.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(recorded.origin(), Timestamp::from_millis(250.0));
        assert_eq!(recorded.duration(), Timestamp::from_millis(150.0));

        let added = Animation::new("added")
            .with_waypoint(&"1".into(), waypoint(120.0, 0.0, 0.0))
            .unwrap()
            .with_waypoint(&"1".into(), waypoint(170.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(added.origin(), Timestamp::from_millis(120.0));
        assert_eq!(added.duration(), Timestamp::from_millis(50.0));
    }

    #[test]
    fn test_json_shape() {
        let animation = Animation::new("Animation 1")
            .with_waypoint(&"0".into(), waypoint(300.0, 150.0, 250.0))
            .unwrap();
        let value = serde_json::to_value(&animation).unwrap();

        assert_eq!(value["name"], "Animation 1");
        assert_eq!(value["actors"]["0"][0]["time"], 300.0);
        assert_eq!(value["actors"]["0"][0]["position"]["x"], 150.0);
        assert!(value.get("startedAt").is_none());

        let back: Animation = serde_json::from_value(value).unwrap();
        assert_eq!(back, animation);
    }
}
