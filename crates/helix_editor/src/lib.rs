//! Helix Editor
//!
//! The state side of the animation editor: pointer input moves actors
//! around the stage, the recorder folds their movement into the selected
//! animation while recording, and the render description shows either the
//! live stage or the tweened playback.
//!
//! - **State**: immutable `EditorState` snapshots shared as `Arc`s
//! - **Reducer**: pure `(state, action, time) -> state` transitions
//! - **Editor**: single-threaded dispatch loop with duplicate suppression
//! - **Persistence**: load once at startup, debounced writes afterwards
//!
//! # Example
//!
//! ```rust
//! use helix_editor::{Editor, EditorConfig, InputEvent, Mode, TimedEvent};
//! use helix_core::Timestamp;
//!
//! let mut editor = Editor::from_config(&EditorConfig::default());
//! let at = Timestamp::from_millis;
//!
//! editor.push(TimedEvent::new(at(250.0), InputEvent::ClickRecord));
//! editor.push(TimedEvent::new(at(300.0), InputEvent::PointerDown { actor: "0".into() }));
//! editor.push(TimedEvent::new(at(400.0), InputEvent::PointerMove { x: 200.0, y: 300.0 }));
//! editor.push(TimedEvent::new(at(500.0), InputEvent::ClickRecord));
//! editor.process();
//!
//! let state = editor.state();
//! assert_eq!(state.mode, Mode::Editing);
//! assert_eq!(state.animations[0].track("0").map(|t| t.len()), Some(2));
//! ```

pub mod action;
pub mod actor;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod persist;
pub mod reducer;
pub mod render;
pub mod state;

pub use action::Action;
pub use actor::{ActorModel, Stage};
pub use config::{ActorConfig, EditorConfig, PersistenceConfig};
pub use editor::Editor;
pub use error::{ConfigError, EditorError, PersistError};
pub use event::{InputEvent, TimedEvent};
pub use persist::{load_state, DebouncedWriter, FileStorage, MemoryStorage, PersistRequest, Storage};
pub use reducer::reduce;
pub use render::{view, RenderNode};
pub use state::{EditorState, Mode};
