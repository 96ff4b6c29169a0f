//! Built-in workout templates.

use serde::Serialize;

use crate::tree::{new_node_id, EventType, LoopNode, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rounds: u32,
    pub work: (&'static str, u64),
    pub rest: (&'static str, u64),
}

pub static PRESETS: [WorkoutPreset; 5] = [
    WorkoutPreset {
        id: "tabata",
        name: "Tabata",
        description: "8 rounds × (20s work / 10s rest)",
        rounds: 8,
        work: ("Work", 20),
        rest: ("Rest", 10),
    },
    WorkoutPreset {
        id: "pomodoro",
        name: "Pomodoro",
        description: "4 rounds × (25m focus / 5m break)",
        rounds: 4,
        work: ("Focus", 25 * 60),
        rest: ("Break", 5 * 60),
    },
    WorkoutPreset {
        id: "emom-10",
        name: "EMOM 10",
        description: "10 rounds × (50s work / 10s transition)",
        rounds: 10,
        work: ("Work", 50),
        rest: ("Transition", 10),
    },
    WorkoutPreset {
        id: "interval-30-30",
        name: "30/30 Intervals",
        description: "6 rounds × (30s work / 30s rest)",
        rounds: 6,
        work: ("Work", 30),
        rest: ("Rest", 30),
    },
    WorkoutPreset {
        id: "stretch-routine",
        name: "Stretch Routine",
        description: "8 stretches × 30s each",
        rounds: 8,
        work: ("Stretch", 30),
        rest: ("Transition", 5),
    },
];

impl WorkoutPreset {
    /// Fresh tree with fresh ids on every call.
    pub fn generate_tree(&self) -> LoopNode {
        LoopNode::new(
            new_node_id(),
            self.rounds,
            vec![
                Node::atomic(new_node_id(), EventType::Work, self.work.1, self.work.0),
                Node::atomic(new_node_id(), EventType::Rest, self.rest.1, self.rest.0),
            ],
        )
    }
}

pub fn find_preset(id: &str) -> Option<&'static WorkoutPreset> {
    PRESETS.iter().find(|p| p.id == id)
}
