//! # looptimer Core Library
//!
//! This library provides the core logic of the looptimer interval timer.
//! Workouts are nested, repeatable timer sequences; the library expands them
//! into a flat playback queue and drives that queue with a tick-based
//! runner. The `looptimer` CLI is a thin host over the same library.
//!
//! ## Architecture
//!
//! - **Tree**: atomic intervals nested in repeatable loops, id-based lookup,
//!   copy-on-write structural edits, and flattening into playable events
//! - **Runner**: a state machine advanced by exactly one `tick()` per second
//!   from the host, with countdown lead-in, pause and skip navigation
//! - **Store**: the explicit state container tying workouts, the draft,
//!   the runner and settings together, with write-through persistence
//! - **Storage**: SQLite key-value and in-memory backends, TOML host config
//!
//! ## Key Components
//!
//! - [`TimerStore`]: State container and the operations hosts call
//! - [`Runner`]: Playback state machine
//! - [`flatten`]: Tree to queue expansion
//! - [`select_cue`]: Sound cue selection for the audio collaborator

pub mod error;
pub mod events;
pub mod format;
pub mod runner;
pub mod settings;
pub mod storage;
pub mod store;
pub mod tree;
pub mod workout;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::RunnerEvent;
pub use runner::{
    select_cue, AudioOutput, Runner, RunnerStatus, SilentOutput, SoundCue, COUNTDOWN_DURATION,
};
pub use settings::{SoundPreset, ThemeMode};
pub use storage::{Config, Database, MemoryStorage, StateStorage};
pub use store::TimerStore;
pub use tree::{
    flatten, flatten_loop, EventType, LoopNode, Node, NodeKind, NodePatch, NodeRef,
    PlayableEvent, TimerNode, ROOT_ID,
};
pub use workout::{ActiveWorkout, Workout, WorkoutPreset, PRESETS};
