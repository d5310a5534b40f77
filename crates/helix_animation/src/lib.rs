//! Helix Animation Model
//!
//! Recorded actor movement and its reconstruction over time.
//!
//! # Features
//!
//! - **Tracks**: append-only, time-ordered waypoint histories per actor
//! - **Animations**: named collections of tracks recorded in one session
//! - **Tweening**: piecewise-linear position at any query time
//! - **Playback**: sample every actor of an animation frame by frame
//!
//! # Example
//!
//! ```rust
//! use helix_animation::{tween, Waypoint};
//! use helix_core::{Point, Timestamp};
//!
//! let waypoints = [
//!     Waypoint::new(Timestamp::from_millis(0.0), Point::new(0.0, 0.0)),
//!     Waypoint::new(Timestamp::from_millis(10.0), Point::new(10.0, 0.0)),
//! ];
//!
//! let position = tween(&waypoints, Timestamp::from_millis(5.0)).unwrap();
//! assert_eq!(position, Point::new(5.0, 0.0));
//! ```

pub mod animation;
pub mod error;
pub mod path;
pub mod player;
pub mod sample;
pub mod track;
pub mod tween;

pub use animation::Animation;
pub use error::{TrackError, TweenError};
pub use path::track_path;
pub use player::{AnimationPlayer, FrameSample, PlayerConfig, PlayerState};
pub use sample::{sample_animation, ActorPose, Poses};
pub use track::{ActorId, ActorTrack, Waypoint};
pub use tween::tween;
