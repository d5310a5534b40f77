//! Editor state snapshots

use helix_animation::Animation;
use helix_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the editor is doing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Editing,
    Recording,
    Playing,
}

/// The whole editor state.
///
/// Values are never mutated once published: every transition builds a new
/// `EditorState`. Animations are held behind `Arc`s so a transition only
/// copies the animation it changes; the rest are shared with the previous
/// snapshot.
///
/// `selected_animation` is a valid index into `animations`, or `None` when
/// there are no animations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub animations: Vec<Arc<Animation>>,
    #[serde(default)]
    pub selected_animation: Option<usize>,
    #[serde(default)]
    pub started_playing_at: Option<Timestamp>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Arc<Animation>> {
        self.selected_animation.and_then(|index| self.animations.get(index))
    }

    pub fn is_recording(&self) -> bool {
        self.mode == Mode::Recording
    }

    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playing
    }

    /// Playback time elapsed at `now`, while playing
    pub fn playback_elapsed(&self, now: Timestamp) -> Option<Timestamp> {
        match (self.mode, self.started_playing_at) {
            (Mode::Playing, Some(started)) => Some(now.elapsed_since(started)),
            _ => None,
        }
    }

    /// Repair a state read back from storage.
    ///
    /// Times in a stored state belong to a previous run's epoch, so a
    /// restored editor always starts in `Editing` with no playback start.
    /// The selection is pointed at the last animation if it is missing or
    /// out of range.
    pub fn normalized(self) -> Self {
        Self {
            mode: Mode::Editing,
            started_playing_at: None,
            ..self.with_valid_selection()
        }
    }

    /// Point a missing or out-of-range selection at the last animation, and
    /// clear it when there are none. Everything else is kept.
    pub fn with_valid_selection(self) -> Self {
        let selected_animation = match (self.animations.len(), self.selected_animation) {
            (0, _) => None,
            (len, Some(index)) if index < len => Some(index),
            (len, _) => Some(len - 1),
        };

        Self {
            selected_animation,
            ..self
        }
    }
}
