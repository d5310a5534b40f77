//! Render description
//!
//! A backend-agnostic tree of named elements. The editor never draws
//! anything itself; a UI layer walks the tree produced by [`view`].

use crate::actor::ActorModel;
use crate::error::Result;
use crate::state::{EditorState, Mode};
use helix_animation::path::EMPTY_PATH;
use helix_animation::{track_path, tween};
use helix_core::{Point, Timestamp};
use indexmap::IndexMap;
use serde::Serialize;

/// One element of the render tree
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderNode {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for the first node carrying `class`
    pub fn find(&self, class: &str) -> Option<&RenderNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(class))
    }
}

/// Where each actor should be drawn at `now`.
///
/// While playing, actors with recorded movement in the selected animation
/// follow their tweened track; everything else stays at its live position.
pub fn actor_positions(state: &EditorState, actors: &[ActorModel], now: Timestamp) -> Result<Vec<ActorModel>> {
    let playback = match (state.playback_elapsed(now), state.selected()) {
        (Some(elapsed), Some(animation)) => Some((animation, animation.origin() + elapsed)),
        _ => None,
    };

    actors
        .iter()
        .map(|actor| {
            let tracked = playback.and_then(|(animation, time)| {
                animation
                    .actors
                    .get(&actor.name)
                    .filter(|track| !track.is_empty())
                    .map(|track| tween(track.waypoints(), time))
            });

            Ok(match tracked {
                Some(position) => ActorModel::new(actor.name.clone(), position?),
                None => actor.clone(),
            })
        })
        .collect()
}

/// The full editor view for `state` at `now`.
///
/// Pure: the same state, actors and time always give the same tree.
pub fn view(state: &EditorState, actors: &[ActorModel], now: Timestamp) -> Result<RenderNode> {
    let positioned = actor_positions(state, actors, now)?;

    Ok(RenderNode::new("div")
        .class("editor")
        .child(state_view(state))
        .child(animation_list(state))
        .child(controls(state))
        .child(canvas(state, &positioned)))
}

fn state_view(state: &EditorState) -> RenderNode {
    RenderNode::new("pre")
        .class("state")
        .text(serde_json::to_string_pretty(state).unwrap_or_default())
}

fn animation_list(state: &EditorState) -> RenderNode {
    let buttons = state.animations.iter().enumerate().map(|(index, animation)| {
        let button = RenderNode::new("button")
            .class("animation")
            .attr("data-index", index.to_string())
            .text(animation.name.as_str());
        if state.selected_animation == Some(index) {
            button.class("selected")
        } else {
            button
        }
    });

    RenderNode::new("div")
        .class("animations")
        .children(buttons)
        .child(RenderNode::new("button").class("add-animation").text("+"))
}

fn controls(state: &EditorState) -> RenderNode {
    let record = if state.mode == Mode::Recording { "Recording" } else { "Record" };
    let play = if state.mode == Mode::Playing { "Playing" } else { "Play" };

    RenderNode::new("div")
        .class("controls")
        .child(RenderNode::new("button").class("record").text(record))
        .child(RenderNode::new("button").class("play").text(play))
}

fn canvas(state: &EditorState, actors: &[ActorModel]) -> RenderNode {
    let actor_nodes = actors.iter().map(|actor| {
        RenderNode::new("div")
            .class("actor")
            .class(format!("actor-{}", actor.name))
            .position(actor.position)
            .text(serde_json::to_string(actor).unwrap_or_default())
    });

    let mut paths: Vec<RenderNode> = state
        .selected()
        .map(|animation| {
            animation
                .actors
                .iter()
                .filter(|(_, track)| !track.is_empty())
                .map(|(name, track)| {
                    RenderNode::new("path")
                        .class(format!("track-{name}"))
                        .attr("d", track_path(track))
                })
                .collect()
        })
        .unwrap_or_default();

    if paths.is_empty() {
        paths.push(RenderNode::new("path").class("track").attr("d", EMPTY_PATH));
    }

    RenderNode::new("svg")
        .class("canvas")
        .children(actor_nodes)
        .children(paths)
}
