//! Input events

use helix_animation::ActorId;
use helix_core::Timestamp;
use serde::{Deserialize, Serialize};

/// A discrete input from the UI layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer pressed on an actor
    PointerDown { actor: ActorId },
    /// Pointer moved anywhere on the canvas
    PointerMove { x: f32, y: f32 },
    /// Pointer released anywhere on the canvas
    PointerUp,
    ClickRecord,
    ClickPlay,
    ClickAddAnimation,
    ClickSelectAnimation { index: usize },
    ClickDestroyAnimation { index: usize },
}

/// An input event stamped with the application time it arrived at
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub time: Timestamp,
    pub event: InputEvent,
}

impl TimedEvent {
    pub fn new(time: Timestamp, event: InputEvent) -> Self {
        Self { time, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_format() {
        let json = r#"[
            {"time": 250, "event": {"type": "click_record"}},
            {"time": 300, "event": {"type": "pointer_down", "actor": "0"}},
            {"time": 400, "event": {"type": "pointer_move", "x": 200, "y": 300}},
            {"time": 450, "event": {"type": "click_select_animation", "index": 0}}
        ]"#;

        let events: Vec<TimedEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].event, InputEvent::ClickRecord);
        assert_eq!(events[1].event, InputEvent::PointerDown { actor: "0".into() });
        assert_eq!(events[2].event, InputEvent::PointerMove { x: 200.0, y: 300.0 });
        assert_eq!(events[2].time, Timestamp::from_millis(400.0));
        assert_eq!(events[3].event, InputEvent::ClickSelectAnimation { index: 0 });
    }
}
