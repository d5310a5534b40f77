//! Event dispatch loop
//!
//! Input events are queued in arrival order and folded one at a time into
//! the current state. Only states that differ structurally from the
//! previous one are published to observers and to persistence.

use crate::action::Action;
use crate::actor::Stage;
use crate::config::{EditorConfig, PersistenceConfig};
use crate::error::{PersistError, Result};
use crate::event::{InputEvent, TimedEvent};
use crate::persist::{load_state, DebouncedWriter, Storage};
use crate::reducer::reduce;
use crate::render::{view, RenderNode};
use crate::state::EditorState;
use helix_core::{Point, Timestamp};
use std::collections::VecDeque;
use std::sync::Arc;

/// Called with every published state
pub type Observer = Box<dyn FnMut(&Arc<EditorState>)>;

struct Persistence {
    storage: Box<dyn Storage>,
    writer: DebouncedWriter,
}

/// Owns the editor state and the stage, and applies input to them
pub struct Editor {
    state: Arc<EditorState>,
    stage: Stage,
    queue: VecDeque<TimedEvent>,
    observers: Vec<Observer>,
    persistence: Option<Persistence>,
}

impl Editor {
    pub fn new(stage: Stage) -> Self {
        Self {
            state: Arc::new(EditorState::default()),
            stage,
            queue: VecDeque::new(),
            observers: Vec::new(),
            persistence: None,
        }
    }

    /// An editor with the configured actors and no persistence
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.stage())
    }

    /// Start from the state stored in `storage` and save changes back to it
    pub fn with_persistence(mut self, storage: Box<dyn Storage>, config: &PersistenceConfig) -> Self {
        self.state = Arc::new(load_state(storage.as_ref(), &config.key));
        self.persistence = Some(Persistence {
            storage,
            writer: DebouncedWriter::new(config.key.as_str(), config.debounce()),
        });
        self
    }

    /// Replace the current state without publishing it.
    ///
    /// An out-of-range selection is repaired first.
    pub fn with_state(mut self, state: EditorState) -> Self {
        self.state = Arc::new(state.with_valid_selection());
        self
    }

    /// The current snapshot
    pub fn state(&self) -> Arc<EditorState> {
        Arc::clone(&self.state)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn storage(&self) -> Option<&dyn Storage> {
        self.persistence.as_ref().map(|p| p.storage.as_ref())
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Arc<EditorState>) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Queue an event for the next [`Editor::process`]
    pub fn push(&mut self, event: TimedEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch every queued event in order, returning the states published.
    ///
    /// A rejected event is logged and skipped; the events after it still
    /// apply.
    pub fn process(&mut self) -> Vec<Arc<EditorState>> {
        let mut published = Vec::new();

        while let Some(event) = self.queue.pop_front() {
            let time = event.time;
            match self.dispatch(event) {
                Ok(Some(state)) => published.push(state),
                Ok(None) => {}
                Err(e) => tracing::warn!(%time, error = %e, "input event rejected"),
            }
        }

        published
    }

    /// Apply one event immediately.
    ///
    /// Returns the new state if it was published, `None` if the event had no
    /// effect. A rejected event leaves both the state and the stage as they
    /// were.
    pub fn dispatch(&mut self, event: TimedEvent) -> Result<Option<Arc<EditorState>>> {
        let mut stage = self.stage.clone();
        let action = match event.event {
            InputEvent::PointerDown { ref actor } => stage.pointer_down(actor).map(Action::RecordWaypoint),
            InputEvent::PointerMove { x, y } => stage.pointer_move(Point::new(x, y)).map(Action::RecordWaypoint),
            InputEvent::PointerUp => {
                stage.pointer_up();
                None
            }
            ref click => Action::from_click(click),
        };

        let published = match action {
            Some(action) => self.apply(&action, event.time)?,
            None => None,
        };
        self.stage = stage;
        Ok(published)
    }

    /// Run `action` through the reducer and publish the result if it changed
    /// anything
    pub fn apply(&mut self, action: &Action, time: Timestamp) -> Result<Option<Arc<EditorState>>> {
        let next = reduce(&self.state, action, time)?;
        if next == *self.state {
            tracing::trace!(?action, "state unchanged");
            return Ok(None);
        }

        if next.mode != self.state.mode {
            tracing::info!(from = ?self.state.mode, to = ?next.mode, %time, "mode changed");
        }

        let next = Arc::new(next);
        self.state = Arc::clone(&next);

        for observer in &mut self.observers {
            observer(&next);
        }
        if let Some(persistence) = &mut self.persistence {
            persistence.writer.note(Arc::clone(&next), time);
        }

        Ok(Some(next))
    }

    /// Render the editor at `now`, writing out state whose debounce elapsed
    pub fn frame(&mut self, now: Timestamp) -> Result<RenderNode> {
        if let Some(persistence) = &mut self.persistence {
            if let Err(e) = persistence.writer.write_due(now, persistence.storage.as_mut()) {
                tracing::warn!(error = %e, "failed to save editor state, will retry");
            }
        }

        view(&self.state, self.stage.actors(), now)
    }

    /// Write any pending state immediately
    pub fn flush(&mut self) -> std::result::Result<(), PersistError> {
        let Some(persistence) = &mut self.persistence else {
            return Ok(());
        };

        persistence.writer.write_pending(persistence.storage.as_mut())?;
        Ok(())
    }
}
