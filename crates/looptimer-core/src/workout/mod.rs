//! Workouts: a named tree, either saved or still a draft.

mod naming;
mod presets;

pub use naming::{generate_unique_name, is_name_unique, is_valid_name, normalize_name, BASE_NAME};
pub use presets::{find_preset, WorkoutPreset, PRESETS};

use serde::{Deserialize, Serialize};

use crate::tree::{flatten_loop, new_node_id, total_duration, EventType, LoopNode, Node, PlayableEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub root_node: LoopNode,
}

impl Workout {
    /// New workout with a fresh id.
    pub fn new(name: impl Into<String>, root_node: LoopNode) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            root_node,
        }
    }

    /// Tree given to workouts created without one: a single 30s work interval.
    pub fn default_root() -> LoopNode {
        LoopNode::new(
            new_node_id(),
            1,
            vec![Node::atomic(new_node_id(), EventType::Work, 30, "Work")],
        )
    }

    pub fn queue(&self) -> Vec<PlayableEvent> {
        flatten_loop(&self.root_node)
    }

    /// Length of one full run in seconds, countdown excluded.
    pub fn total_duration(&self) -> u64 {
        total_duration(&self.queue())
    }
}

/// The workout an operation acts on, resolved once per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveWorkout<'a> {
    Draft(&'a Workout),
    Saved(&'a Workout),
    None,
}

impl<'a> ActiveWorkout<'a> {
    /// Resolve `active_id` against the draft first, then the saved list.
    pub fn resolve(
        active_id: Option<&str>,
        draft: Option<&'a Workout>,
        saved: &'a [Workout],
    ) -> Self {
        let Some(id) = active_id else {
            return ActiveWorkout::None;
        };
        if let Some(d) = draft.filter(|d| d.id == id) {
            return ActiveWorkout::Draft(d);
        }
        saved
            .iter()
            .find(|w| w.id == id)
            .map_or(ActiveWorkout::None, ActiveWorkout::Saved)
    }

    pub fn workout(self) -> Option<&'a Workout> {
        match self {
            ActiveWorkout::Draft(w) | ActiveWorkout::Saved(w) => Some(w),
            ActiveWorkout::None => None,
        }
    }

    pub fn is_draft(self) -> bool {
        matches!(self, ActiveWorkout::Draft(_))
    }
}
