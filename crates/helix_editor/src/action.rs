//! Editor actions

use crate::actor::ActorModel;
use crate::event::InputEvent;

/// A state transition request understood by the reducer
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// The record button: start, finish, or stop playback
    ToggleRecord,
    StartRecording,
    FinishRecording,
    /// The play button: start or stop playback
    TogglePlay,
    AddAnimation,
    SelectAnimation(usize),
    DestroyAnimation(usize),
    /// An actor's model changed
    RecordWaypoint(ActorModel),
}

impl Action {
    /// The action a button click maps to.
    ///
    /// Pointer events go through the stage first and are not covered here.
    pub fn from_click(event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::ClickRecord => Some(Action::ToggleRecord),
            InputEvent::ClickPlay => Some(Action::TogglePlay),
            InputEvent::ClickAddAnimation => Some(Action::AddAnimation),
            InputEvent::ClickSelectAnimation { index } => Some(Action::SelectAnimation(*index)),
            InputEvent::ClickDestroyAnimation { index } => Some(Action::DestroyAnimation(*index)),
            InputEvent::PointerDown { .. } | InputEvent::PointerMove { .. } | InputEvent::PointerUp => {
                None
            }
        }
    }
}
