//! Animation player
//!
//! Plays a recorded animation back over a [`VirtualClock`], yielding the
//! pose of every recorded actor per frame. The caller owns the frame loop
//! and tells the player how much real time passed; nothing here sleeps or
//! reads the wall clock.

use crate::animation::Animation;
use crate::error::TweenError;
use crate::sample::{sample_animation, Poses};
use helix_core::time::{frame_duration, DEFAULT_FRAME_DURATION};
use helix_core::{Timestamp, VirtualClock};
use serde::Serialize;
use std::sync::Arc;

/// Configuration for the animation player.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Initial playback speed (1.0 = normal).
    pub speed: f64,
    /// Whether to restart when reaching the end.
    pub loop_playback: bool,
    /// Frame duration for stepping.
    pub frame_duration: Timestamp,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            loop_playback: false,
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }
}

impl PlayerConfig {
    /// Step at `fps` frames per second.
    ///
    /// A rate that is not positive and finite is ignored.
    pub fn with_fps(mut self, fps: f64) -> Self {
        match frame_duration(fps) {
            Some(frame) => self.frame_duration = frame,
            None => tracing::warn!(fps, "ignoring invalid frame rate"),
        }
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_loop(mut self, loop_playback: bool) -> Self {
        self.loop_playback = loop_playback;
        self
    }
}

/// Current state of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// Not started or reset.
    Idle,
    Playing,
    Paused,
    /// Reached the end.
    Finished,
}

/// One sampled frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSample {
    /// Playback time since the animation's origin
    pub elapsed: Timestamp,
    pub poses: Poses,
}

/// Plays one animation back frame by frame.
pub struct AnimationPlayer {
    animation: Arc<Animation>,
    clock: VirtualClock,
    config: PlayerConfig,
    state: PlayerState,
}

impl AnimationPlayer {
    pub fn new(animation: Arc<Animation>, config: PlayerConfig) -> Self {
        let mut clock =
            VirtualClock::new(animation.duration()).with_frame_duration(config.frame_duration);
        clock.set_speed(config.speed);

        Self {
            animation,
            clock,
            config,
            state: PlayerState::Idle,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn position(&self) -> Timestamp {
        self.clock.position()
    }

    pub fn duration(&self) -> Timestamp {
        self.clock.duration()
    }

    pub fn progress(&self) -> f32 {
        self.clock.progress()
    }

    /// Start or resume playback.
    pub fn play(&mut self) {
        match self.state {
            PlayerState::Idle | PlayerState::Paused => {
                self.clock.play();
                self.state = PlayerState::Playing;
            }
            PlayerState::Finished => {
                if self.config.loop_playback {
                    self.reset();
                    self.clock.play();
                    self.state = PlayerState::Playing;
                }
            }
            PlayerState::Playing => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.clock.pause();
            self.state = PlayerState::Paused;
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlayerState::Playing => self.pause(),
            _ => self.play(),
        }
    }

    /// Back to the beginning, stopped.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.state = PlayerState::Idle;
    }

    pub fn seek(&mut self, position: Timestamp) {
        self.clock.seek(position);
        if self.state == PlayerState::Finished && !self.clock.is_at_end() {
            self.state = PlayerState::Paused;
        }
    }

    /// Poses at the current position.
    pub fn sample(&self) -> Result<FrameSample, TweenError> {
        let elapsed = self.clock.position();
        Ok(FrameSample {
            elapsed,
            poses: sample_animation(&self.animation, elapsed)?,
        })
    }

    /// Advance by `real_elapsed` and sample (call every frame while playing).
    pub fn advance(&mut self, real_elapsed: Timestamp) -> Result<FrameSample, TweenError> {
        if self.state == PlayerState::Playing && self.clock.advance(real_elapsed) {
            if self.config.loop_playback {
                tracing::debug!(animation = %self.animation.name, "looping playback");
                let sample = self.sample();
                self.reset();
                self.play();
                return sample;
            }
            self.state = PlayerState::Finished;
        }
        self.sample()
    }

    /// Step forward by one frame, pausing.
    pub fn step(&mut self) -> Result<FrameSample, TweenError> {
        self.clock.pause();
        self.clock.step_forward();
        self.state = if self.clock.is_at_end() {
            PlayerState::Finished
        } else {
            PlayerState::Paused
        };
        self.sample()
    }

    /// Step backward by one frame, pausing.
    pub fn step_back(&mut self) -> Result<FrameSample, TweenError> {
        self.clock.pause();
        self.clock.step_backward();
        self.state = PlayerState::Paused;
        self.sample()
    }

    /// Every frame from the current position to the end, one frame apart.
    ///
    /// The final frame always lands exactly on the end of the animation.
    pub fn frames(&mut self) -> Result<Vec<FrameSample>, TweenError> {
        let mut frames = vec![self.sample()?];
        while !self.clock.is_at_end() {
            frames.push(self.step()?);
        }
        Ok(frames)
    }
}
