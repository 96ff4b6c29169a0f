//! Workout lifecycle commands for CLI.

use clap::Subcommand;
use looptimer_core::format::format_duration;
use looptimer_core::workout::find_preset;
use looptimer_core::{ActiveWorkout, LoopNode, TimerStore, Workout, PRESETS};
use serde_json::json;

use super::{ensure, open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List saved workouts and the draft
    List,
    /// Show a workout's tree (default: the active one)
    Show {
        /// Workout ID
        id: Option<String>,
    },
    /// Start a new draft and make it active
    Create {
        /// Workout name (a default name is generated when missing or taken)
        name: Option<String>,
        /// Root loop as JSON
        #[arg(long)]
        tree: Option<String>,
    },
    /// Start a draft from a built-in preset, or list presets
    Preset {
        /// Preset ID (e.g. "tabata")
        id: Option<String>,
    },
    /// Rename the draft or a saved workout
    Rename {
        /// Workout ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,
    },
    /// Make a workout active, or clear the selection
    Select {
        /// Workout ID
        id: Option<String>,
    },
    /// Commit the draft to the saved workouts
    Save,
    /// Throw the draft away
    Discard,
}

fn summary(workout: &Workout, store: &TimerStore, draft: bool) -> serde_json::Value {
    let total = workout.total_duration();
    json!({
        "id": workout.id,
        "name": workout.name,
        "events": workout.queue().len(),
        "totalSecs": total,
        "total": format_duration(total),
        "draft": draft,
        "active": store.active_workout_id() == Some(workout.id.as_str()),
    })
}

fn find<'a>(store: &'a TimerStore, id: &str) -> Option<&'a Workout> {
    ActiveWorkout::resolve(Some(id), store.draft_workout(), store.workouts()).workout()
}

pub fn run(action: WorkoutAction) -> CmdResult {
    let mut store = open_store()?;

    match action {
        WorkoutAction::List => {
            let mut rows: Vec<_> = store
                .workouts()
                .iter()
                .map(|w| summary(w, &store, false))
                .collect();
            if let Some(draft) = store.draft_workout() {
                rows.push(summary(draft, &store, true));
            }
            print_json(&rows)?;
        }
        WorkoutAction::Show { id } => {
            let workout = match id.as_deref() {
                Some(id) => find(&store, id),
                None => store.active_workout().workout(),
            };
            let Some(workout) = workout else {
                return Err("no such workout".into());
            };
            print_json(workout)?;
        }
        WorkoutAction::Create { name, tree } => {
            let root = tree
                .as_deref()
                .map(serde_json::from_str::<LoopNode>)
                .transpose()?;
            let Some(id) = store.create_workout(root, name.as_deref()) else {
                return Err("tree repeats a node id".into());
            };
            if let Some(draft) = store.draft_workout() {
                print_json(&summary(draft, &store, true))?;
            }
            tracing::debug!(id = %id, "created draft from CLI");
        }
        WorkoutAction::Preset { id: None } => {
            let presets: Vec<_> = PRESETS
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "name": p.name,
                        "description": p.description,
                    })
                })
                .collect();
            print_json(&presets)?;
        }
        WorkoutAction::Preset { id: Some(id) } => {
            let Some(preset) = find_preset(&id) else {
                return Err(format!("unknown preset: {id}").into());
            };
            store.create_workout(Some(preset.generate_tree()), Some(preset.name));
            if let Some(draft) = store.draft_workout() {
                print_json(&summary(draft, &store, true))?;
            }
        }
        WorkoutAction::Rename { id, name } => {
            ensure(
                store.update_workout_name(&id, &name),
                format!("cannot rename {id}: name is empty, taken, or workout not found"),
            )?;
            println!("ok");
        }
        WorkoutAction::Delete { id } => {
            ensure(store.delete_workout(&id), format!("workout not found: {id}"))?;
            println!("ok");
        }
        WorkoutAction::Select { id } => {
            if let Some(id) = id.as_deref() {
                ensure(find(&store, id).is_some(), format!("workout not found: {id}"))?;
            }
            store.set_active_workout(id.as_deref());
            println!("ok");
        }
        WorkoutAction::Save => {
            ensure(store.save_draft(), "no draft to save")?;
            println!("ok");
        }
        WorkoutAction::Discard => {
            ensure(store.discard_draft(), "no draft to discard")?;
            println!("ok");
        }
    }

    store.flush()?;
    Ok(())
}
