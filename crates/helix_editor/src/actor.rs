//! Actors on the stage
//!
//! Actor models are live interaction state: they follow the pointer while
//! dragged and are never persisted. Every change to an actor's model is fed
//! to the recorder.

use helix_animation::ActorId;
use helix_core::Point;
use serde::{Deserialize, Serialize};

/// The live position of one actor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorModel {
    pub name: ActorId,
    pub position: Point,
}

impl ActorModel {
    pub fn new(name: impl Into<ActorId>, position: Point) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// All actors plus the one currently held by the pointer
#[derive(Clone, Debug, Default)]
pub struct Stage {
    actors: Vec<ActorModel>,
    grabbed: Option<usize>,
}

impl Stage {
    pub fn new(actors: Vec<ActorModel>) -> Self {
        Self {
            actors,
            grabbed: None,
        }
    }

    pub fn actors(&self) -> &[ActorModel] {
        &self.actors
    }

    pub fn actor(&self, name: &str) -> Option<&ActorModel> {
        self.actors.iter().find(|actor| actor.name.as_str() == name)
    }

    /// The actor being dragged, if any
    pub fn grabbed(&self) -> Option<&ActorModel> {
        self.grabbed.and_then(|index| self.actors.get(index))
    }

    /// Grab an actor.
    ///
    /// Returns its unchanged model so the press itself is recorded. Unknown
    /// actors are ignored.
    pub fn pointer_down(&mut self, name: &ActorId) -> Option<ActorModel> {
        let Some(index) = self.actors.iter().position(|actor| &actor.name == name) else {
            tracing::debug!(actor = %name, "pointer down on unknown actor");
            return None;
        };

        self.grabbed = Some(index);
        self.actors.get(index).cloned()
    }

    /// Move the grabbed actor to `position`, returning its new model.
    ///
    /// Moves with nothing grabbed are ignored.
    pub fn pointer_move(&mut self, position: Point) -> Option<ActorModel> {
        let actor = self.actors.get_mut(self.grabbed?)?;
        actor.position = position;
        Some(actor.clone())
    }

    /// Release whatever is grabbed
    pub fn pointer_up(&mut self) {
        self.grabbed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Stage {
        Stage::new(vec![
            ActorModel::new("0", Point::new(150.0, 250.0)),
            ActorModel::new("1", Point::new(500.0, 250.0)),
        ])
    }

    #[test]
    fn test_can_be_dragged_around() {
        let mut stage = stage();

        // Moves before the press are ignored
        assert_eq!(stage.pointer_move(Point::new(0.0, 0.0)), None);

        let pressed = stage.pointer_down(&"0".into()).unwrap();
        assert_eq!(pressed.position, Point::new(150.0, 250.0));

        let moved = stage.pointer_move(Point::new(500.0, 200.0)).unwrap();
        assert_eq!(moved, ActorModel::new("0", Point::new(500.0, 200.0)));

        stage.pointer_up();
        assert_eq!(stage.pointer_move(Point::new(1.0, 1.0)), None);
        assert_eq!(stage.actor("0").unwrap().position, Point::new(500.0, 200.0));
        assert_eq!(stage.actor("1").unwrap().position, Point::new(500.0, 250.0));
    }

    #[test]
    fn test_unknown_actor_is_ignored() {
        let mut stage = stage();
        assert_eq!(stage.pointer_down(&"9".into()), None);
        assert!(stage.grabbed().is_none());
    }
}
