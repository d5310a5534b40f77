//! Frame clocks
//!
//! The editor core never reads time on its own. Everything that needs time
//! consumes `Timestamp` values from one of these sources, so playback can be
//! driven by the wall clock in an application and by a synthetic clock in
//! tests:
//!
//! - `FixedRateClock` - deterministic ticks at a target frame rate
//! - `SystemClock` - elapsed wall-clock time since construction
//! - `VirtualClock` - a controllable clock for previewing a recording

use crate::time::{frame_duration, Timestamp, DEFAULT_FPS, DEFAULT_FRAME_DURATION};
use std::time::Instant;

/// An infinite sequence of frame times starting at zero.
///
/// Frame `n` is at `n * 1000 / fps` milliseconds. Frame times are computed
/// from the frame index rather than accumulated, so they do not drift.
#[derive(Clone, Debug)]
pub struct FixedRateClock {
    fps: f64,
    interval: Timestamp,
    frame: u64,
}

impl FixedRateClock {
    /// A clock ticking at `fps`, `None` unless `fps` is positive and finite
    pub fn new(fps: f64) -> Option<Self> {
        Some(Self {
            fps,
            interval: frame_duration(fps)?,
            frame: 0,
        })
    }

    /// Time between consecutive ticks
    pub fn interval(&self) -> Timestamp {
        self.interval
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Index of the next frame to be produced
    pub fn frame_index(&self) -> u64 {
        self.frame
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            interval: DEFAULT_FRAME_DURATION,
            frame: 0,
        }
    }
}

impl Iterator for FixedRateClock {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Timestamp> {
        let time = Timestamp::from_millis(self.frame as f64 * self.interval.as_millis());
        self.frame += 1;
        Some(time)
    }
}

/// Wall-clock application time.
///
/// The epoch is the moment the clock was created. Each call to `next` yields
/// the elapsed time at that instant; it never blocks.
#[derive(Clone, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_secs_f64(self.epoch.elapsed().as_secs_f64())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SystemClock {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Timestamp> {
        Some(self.now())
    }
}

/// A virtual clock for previewing a recording.
///
/// The virtual clock can be:
/// - Paused/resumed
/// - Seeked to any position within `[0, duration]`
/// - Played at different speeds (0.5x, 1x, 2x, etc.)
///
/// It does not read the wall clock; the caller advances it with the real
/// time that passed since the previous frame.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    /// Current virtual time position.
    position: Timestamp,
    /// Whether the clock is running.
    running: bool,
    /// Playback speed multiplier (1.0 = normal, 2.0 = 2x speed).
    speed: f64,
    /// Length of the material being played.
    duration: Timestamp,
    /// Duration of one step.
    frame: Timestamp,
}

impl VirtualClock {
    pub fn new(duration: Timestamp) -> Self {
        Self {
            position: Timestamp::zero(),
            running: false,
            speed: 1.0,
            duration,
            frame: DEFAULT_FRAME_DURATION,
        }
    }

    /// Use a different step length for `step_forward`/`step_backward`.
    ///
    /// Only positive, finite lengths are accepted; anything else keeps the
    /// current one.
    pub fn with_frame_duration(mut self, frame: Timestamp) -> Self {
        if frame.is_finite() && frame > Timestamp::zero() {
            self.frame = frame;
        }
        self
    }

    pub fn position(&self) -> Timestamp {
        self.position
    }

    pub fn duration(&self) -> Timestamp {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the playback speed, clamped to `0.1..=10.0`.
    ///
    /// NaN is ignored and the speed stays as it was.
    pub fn set_speed(&mut self, speed: f64) {
        if !speed.is_nan() {
            self.speed = speed.clamp(0.1, 10.0);
        }
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Seek to a position, clamped to the clock's range.
    ///
    /// NaN positions are ignored.
    pub fn seek(&mut self, position: Timestamp) {
        if !position.as_millis().is_nan() {
            self.position = position.clamp(Timestamp::zero(), self.duration);
        }
    }

    pub fn seek_to_start(&mut self) {
        self.seek(Timestamp::zero());
    }

    pub fn seek_to_end(&mut self) {
        self.seek(self.duration);
    }

    /// Seek by a relative amount of milliseconds (negative goes back).
    pub fn seek_by(&mut self, delta_ms: f64) {
        self.seek(Timestamp::from_millis(self.position.as_millis() + delta_ms));
    }

    pub fn step_forward(&mut self) {
        self.seek_by(self.frame.as_millis());
    }

    pub fn step_backward(&mut self) {
        self.seek_by(-self.frame.as_millis());
    }

    /// Advance by `real_elapsed` scaled by the speed.
    ///
    /// Returns true if the clock reached the end; it stops running there.
    pub fn advance(&mut self, real_elapsed: Timestamp) -> bool {
        if !self.running {
            return false;
        }

        let scaled = real_elapsed.as_millis().max(0.0) * self.speed;
        self.position = Timestamp::from_millis(self.position.as_millis() + scaled);

        if self.position >= self.duration {
            self.position = self.duration;
            self.running = false;
            return true;
        }

        false
    }

    /// Progress through the duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration.as_millis() <= 0.0 {
            return 0.0;
        }
        (self.position.as_millis() / self.duration.as_millis()) as f32
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.duration
    }

    pub fn is_at_start(&self) -> bool {
        self.position.as_millis() <= 0.0
    }

    /// Reset to the beginning and stop.
    pub fn reset(&mut self) {
        self.position = Timestamp::zero();
        self.running = false;
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(Timestamp::zero())
    }
}
