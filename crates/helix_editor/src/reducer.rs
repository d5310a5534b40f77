//! The recorder
//!
//! Pure transitions from one `EditorState` to the next. Each function takes
//! the current snapshot by reference and returns a new one; the input is
//! never modified.
//!
//! Mode transitions:
//!
//! ```text
//! editing   --start--> recording
//! recording --stop---> editing
//! editing   --play---> playing
//! recording --play---> playing
//! playing   --stop---> editing
//! ```

use crate::action::Action;
use crate::actor::ActorModel;
use crate::error::{EditorError, Result};
use crate::state::{EditorState, Mode};
use helix_animation::{Animation, Waypoint};
use helix_core::Timestamp;
use std::sync::Arc;

/// Apply `action` at application time `time`.
pub fn reduce(state: &EditorState, action: &Action, time: Timestamp) -> Result<EditorState> {
    match action {
        Action::ToggleRecord => Ok(toggle_record(state, time)),
        Action::StartRecording => Ok(start_recording(state, time)),
        Action::FinishRecording => Ok(finish_recording(state, time)),
        Action::TogglePlay => Ok(play_recording(state, time)),
        Action::AddAnimation => Ok(add_animation(state)),
        Action::SelectAnimation(index) => select_animation(state, *index),
        Action::DestroyAnimation(index) => destroy_animation(state, *index),
        Action::RecordWaypoint(actor) => record_waypoint(state, actor, time),
    }
}

/// The record button: starts recording from editing, finishes it while
/// recording, and stops playback while playing.
pub fn toggle_record(state: &EditorState, time: Timestamp) -> EditorState {
    match state.mode {
        Mode::Editing => start_recording(state, time),
        Mode::Recording | Mode::Playing => finish_recording(state, time),
    }
}

/// Enter recording with a fresh, selected animation.
///
/// A no-op while already recording or playing.
pub fn start_recording(state: &EditorState, time: Timestamp) -> EditorState {
    if state.mode != Mode::Editing {
        return state.clone();
    }

    let animation = Animation::recording_from(next_animation_name(state), time);
    EditorState {
        mode: Mode::Recording,
        ..append_and_select(state, animation)
    }
}

/// Return to editing.
///
/// Ends a recording session (the animation is kept even if nothing was
/// recorded) or stops playback.
pub fn finish_recording(state: &EditorState, time: Timestamp) -> EditorState {
    let state = close_session(state, time);
    EditorState {
        mode: Mode::Editing,
        started_playing_at: None,
        ..state
    }
}

/// The play button: toggles between playing and editing.
///
/// Entering playback remembers when it started; leaving recording this way
/// ends the session first.
pub fn play_recording(state: &EditorState, time: Timestamp) -> EditorState {
    if state.mode == Mode::Playing {
        return EditorState {
            mode: Mode::Editing,
            started_playing_at: None,
            ..state.clone()
        };
    }

    EditorState {
        mode: Mode::Playing,
        started_playing_at: Some(time),
        ..close_session(state, time)
    }
}

/// Append an empty animation and select it, leaving the mode alone.
pub fn add_animation(state: &EditorState) -> EditorState {
    append_and_select(state, Animation::new(next_animation_name(state)))
}

/// Append the actor's current position to its track in the selected
/// animation.
///
/// A no-op unless recording with an animation selected.
pub fn record_waypoint(state: &EditorState, actor: &ActorModel, time: Timestamp) -> Result<EditorState> {
    let index = match (state.mode, state.selected_animation) {
        (Mode::Recording, Some(index)) => index,
        _ => return Ok(state.clone()),
    };
    let Some(animation) = state.animations.get(index) else {
        return Ok(state.clone());
    };

    let updated = animation.with_waypoint(&actor.name, Waypoint::new(time, actor.position))?;

    let mut animations = state.animations.clone();
    animations[index] = Arc::new(updated);
    Ok(EditorState {
        animations,
        ..state.clone()
    })
}

/// Select the animation at `index`.
pub fn select_animation(state: &EditorState, index: usize) -> Result<EditorState> {
    check_index(state, index)?;
    Ok(EditorState {
        selected_animation: Some(index),
        ..state.clone()
    })
}

/// Remove the animation at `index`.
///
/// Removing at or before the selection moves the selection back by one
/// (never below the first animation); removing after it leaves it alone.
/// Removing the last animation clears the selection.
pub fn destroy_animation(state: &EditorState, index: usize) -> Result<EditorState> {
    check_index(state, index)?;

    let mut animations = state.animations.clone();
    animations.remove(index);

    let selected_animation = if animations.is_empty() {
        None
    } else {
        match state.selected_animation {
            Some(selected) if index <= selected => Some(selected.saturating_sub(1)),
            other => other,
        }
    };

    Ok(EditorState {
        animations,
        selected_animation,
        ..state.clone()
    })
}

fn check_index(state: &EditorState, index: usize) -> Result<()> {
    if index < state.animations.len() {
        Ok(())
    } else {
        Err(EditorError::InvalidAnimationIndex {
            index,
            len: state.animations.len(),
        })
    }
}

fn next_animation_name(state: &EditorState) -> String {
    format!("Animation {}", state.animations.len() + 1)
}

fn append_and_select(state: &EditorState, animation: Animation) -> EditorState {
    let mut animations = state.animations.clone();
    animations.push(Arc::new(animation));
    EditorState {
        selected_animation: Some(animations.len() - 1),
        animations,
        ..state.clone()
    }
}

/// Stamp the end of the recording session on the selected animation.
fn close_session(state: &EditorState, time: Timestamp) -> EditorState {
    let index = match (state.mode, state.selected_animation) {
        (Mode::Recording, Some(index)) => index,
        _ => return state.clone(),
    };

    let mut animations = state.animations.clone();
    if let Some(animation) = animations.get_mut(index) {
        if animation.started_at.is_some() && animation.finished_at.is_none() {
            *animation = Arc::new(animation.finished(time));
        }
    }

    EditorState {
        animations,
        ..state.clone()
    }
}
