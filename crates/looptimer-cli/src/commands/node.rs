//! Tree editing commands for CLI. All of them act on the active workout.

use clap::{Subcommand, ValueEnum};
use looptimer_core::{EventType, NodeKind, NodePatch, TimerStore, ROOT_ID};

use super::{ensure, open_store, print_json, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Atomic,
    Loop,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Atomic => NodeKind::Atomic,
            KindArg::Loop => NodeKind::Loop,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Work,
    Rest,
}

impl From<TypeArg> for EventType {
    fn from(kind: TypeArg) -> Self {
        match kind {
            TypeArg::Work => EventType::Work,
            TypeArg::Rest => EventType::Rest,
        }
    }
}

#[derive(Subcommand)]
pub enum NodeAction {
    /// Append a node with default values under a loop
    Add {
        /// Kind of node to add
        #[arg(value_enum)]
        kind: KindArg,
        /// Parent loop ID (default: the workout's root)
        #[arg(long, default_value = ROOT_ID)]
        parent: String,
    },
    /// Change fields of a node
    Update {
        /// Node ID
        id: String,
        /// New label (intervals only)
        #[arg(long)]
        label: Option<String>,
        /// New duration in seconds (intervals only)
        #[arg(long)]
        duration: Option<u64>,
        /// New event type (intervals only)
        #[arg(long = "type", value_enum)]
        event_type: Option<TypeArg>,
        /// New repeat count (loops only)
        #[arg(long)]
        iterations: Option<u32>,
    },
    /// Delete a node and everything below it
    Delete {
        /// Node ID
        id: String,
    },
    /// Move a node to the position of a sibling
    Move {
        /// Node to move
        active: String,
        /// Sibling whose position it takes
        over: String,
    },
}

fn print_node(store: &TimerStore, id: &str) -> CmdResult {
    if let Some(node) = store.get_node(id) {
        print_json(&node.to_owned_node())?;
    }
    Ok(())
}

pub fn run(action: NodeAction) -> CmdResult {
    let mut store = open_store()?;
    ensure(
        store.active_workout().workout().is_some(),
        "no active workout (see `workout select`)",
    )?;

    match action {
        NodeAction::Add { kind, parent } => {
            let Some(id) = store.add_node(&parent, kind.into()) else {
                return Err(format!("{parent} is not a loop in the active workout").into());
            };
            print_node(&store, &id)?;
        }
        NodeAction::Update {
            id,
            label,
            duration,
            event_type,
            iterations,
        } => {
            let patch = NodePatch {
                label,
                duration,
                event_type: event_type.map(Into::into),
                iterations,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            ensure(store.update_node(&id, &patch), format!("node not found: {id}"))?;
            print_node(&store, &id)?;
        }
        NodeAction::Delete { id } => {
            ensure(
                store.delete_node(&id),
                format!("cannot delete {id}: not found or the root"),
            )?;
            println!("ok");
        }
        NodeAction::Move { active, over } => {
            ensure(
                store.move_node(&active, &over),
                format!("cannot move {active} over {over}: not siblings"),
            )?;
            println!("ok");
        }
    }

    store.flush()?;
    Ok(())
}
