//! Helix Core
//!
//! Foundational primitives shared by the Helix animation editor:
//!
//! - **Geometry**: 2D points in canvas pixels
//! - **Time**: millisecond timestamps relative to the application start epoch
//! - **Clocks**: frame clocks that drive playback (fixed-rate, wall-clock, virtual)
//!
//! # Example
//!
//! ```rust
//! use helix_core::{FixedRateClock, Timestamp};
//!
//! let frames: Vec<Timestamp> = FixedRateClock::default().take(3).collect();
//! assert_eq!(frames[0], Timestamp::zero());
//! assert!(frames[1] > frames[0]);
//! ```

pub mod clock;
pub mod geometry;
pub mod time;

pub use clock::{FixedRateClock, SystemClock, VirtualClock};
pub use geometry::Point;
pub use time::Timestamp;
