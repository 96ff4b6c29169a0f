//! The application state container.
//!
//! A [`TimerStore`] owns the saved workouts, the optional draft, the active
//! workout reference, the runner and the settings. Stores are explicitly
//! constructed over a [`StateStorage`], so several can coexist. Every
//! operation that changes state writes the persisted subset through to the
//! storage right away.
//!
//! Operations never fail. One that cannot apply (unknown id, no active
//! workout, empty queue, ...) leaves the store untouched and reports that
//! through its return value.

mod persist;

pub use persist::{decode, encode, PersistedState, STORAGE_VERSION};

use crate::error::Result;
use crate::events::RunnerEvent;
use crate::runner::Runner;
use crate::settings::{SoundPreset, ThemeMode};
use crate::storage::{MemoryStorage, StateStorage};
use crate::tree::{self, LoopNode, NodeKind, NodePatch, NodeRef};
use crate::workout::{generate_unique_name, is_name_unique, ActiveWorkout, Workout};

/// Where the active workout lives, resolved once per edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSlot {
    Draft,
    Saved(usize),
}

pub struct TimerStore {
    storage: Box<dyn StateStorage>,
    workouts: Vec<Workout>,
    active_workout_id: Option<String>,
    draft_workout: Option<Workout>,
    runner: Runner,
    sound_preset: SoundPreset,
    theme_mode: ThemeMode,
}

impl TimerStore {
    /// Open a store over `storage`, restoring whatever it holds.
    ///
    /// Missing, unreadable or corrupt payloads yield the defaults. A stored
    /// countdown restarts from the top and a stored run comes back paused.
    pub fn open(storage: impl StateStorage + 'static) -> Self {
        let state = match storage.load() {
            Ok(Some(payload)) => decode(&payload).unwrap_or_default(),
            Ok(None) => PersistedState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored state, using defaults");
                PersistedState::default()
            }
        };
        let runner = state.restore_runner();
        tracing::debug!(
            workouts = state.workouts.len(),
            has_draft = state.draft_workout.is_some(),
            runner = ?runner.status(),
            "store restored"
        );
        Self {
            storage: Box::new(storage),
            workouts: state.workouts,
            active_workout_id: state.active_workout_id,
            draft_workout: state.draft_workout,
            runner,
            sound_preset: state.sound_preset,
            theme_mode: state.theme_mode,
        }
    }

    /// A store over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn draft_workout(&self) -> Option<&Workout> {
        self.draft_workout.as_ref()
    }

    pub fn active_workout_id(&self) -> Option<&str> {
        self.active_workout_id.as_deref()
    }

    pub fn active_workout(&self) -> ActiveWorkout<'_> {
        ActiveWorkout::resolve(
            self.active_workout_id.as_deref(),
            self.draft_workout.as_ref(),
            &self.workouts,
        )
    }

    /// Look up a node of the active workout by id.
    pub fn get_node(&self, id: &str) -> Option<NodeRef<'_>> {
        self.active_workout().workout()?.root_node.find(id)
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn total_duration(&self) -> u64 {
        self.runner.total_duration()
    }

    pub fn elapsed_duration(&self) -> u64 {
        self.runner.elapsed_duration()
    }

    pub fn sound_preset(&self) -> SoundPreset {
        self.sound_preset
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// The persisted subset of the current state.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            workouts: self.workouts.clone(),
            active_workout_id: self.active_workout_id.clone(),
            draft_workout: self.draft_workout.clone(),
            sound_preset: self.sound_preset,
            theme_mode: self.theme_mode,
            runner_status: self.runner.status(),
            runner_queue: self.runner.queue().to_vec(),
            runner_index: self.runner.index(),
            time_left: self.runner.remaining(),
        }
    }

    /// Write the persisted state to storage now, surfacing any error.
    pub fn flush(&self) -> Result<()> {
        let payload = encode(self.persisted_state())?;
        self.storage.save(&payload)
    }

    // ── Workout lifecycle ────────────────────────────────────────────

    /// Start a new draft and make it active, replacing any existing draft.
    ///
    /// Without a tree the draft gets a single 30s work interval. The name is
    /// used when valid and unique, otherwise a default name is generated.
    /// Returns the draft's id, or `None` if `root` repeats a node id.
    pub fn create_workout(&mut self, root: Option<LoopNode>, name: Option<&str>) -> Option<String> {
        let root = root.unwrap_or_else(Workout::default_root);
        if !root.has_unique_ids() {
            tracing::debug!(reason = "duplicate_node_ids", "create workout ignored");
            return None;
        }

        // The draft being replaced does not count against the new name.
        let name = match name.map(str::trim) {
            Some(n) if is_name_unique(n, &self.workouts, None, None) => n.to_string(),
            _ => generate_unique_name(&self.workouts, None),
        };

        let mut draft = Workout::new(name, root);
        while self.workouts.iter().any(|w| w.id == draft.id) {
            draft.id = tree::new_node_id();
        }
        let id = draft.id.clone();
        tracing::info!(id = %id, name = %draft.name, "draft workout created");

        self.draft_workout = Some(draft);
        self.active_workout_id = Some(id.clone());
        self.persist();
        Some(id)
    }

    /// Commit the draft to the saved collection. It stays active.
    pub fn save_draft(&mut self) -> bool {
        let Some(draft) = self.draft_workout.take() else {
            tracing::debug!(reason = "no_draft", "save draft ignored");
            return false;
        };
        tracing::info!(id = %draft.id, name = %draft.name, "draft workout saved");
        self.workouts.push(draft);
        self.persist();
        true
    }

    /// Throw the draft away.
    pub fn discard_draft(&mut self) -> bool {
        let Some(draft) = self.draft_workout.take() else {
            tracing::debug!(reason = "no_draft", "discard draft ignored");
            return false;
        };
        if self.active_workout_id.as_deref() == Some(draft.id.as_str()) {
            self.active_workout_id = None;
        }
        tracing::info!(id = %draft.id, "draft workout discarded");
        self.persist();
        true
    }

    /// Remove a saved workout (or the draft with that id).
    pub fn delete_workout(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        let removed_saved = self.workouts.len() != before;
        let removed_draft = self.draft_workout.as_ref().is_some_and(|d| d.id == id);
        if removed_draft {
            self.draft_workout = None;
        }

        if !removed_saved && !removed_draft {
            tracing::debug!(id, reason = "not_found", "delete workout ignored");
            return false;
        }
        if self.active_workout_id.as_deref() == Some(id) {
            self.active_workout_id = None;
        }
        tracing::info!(id, "workout deleted");
        self.persist();
        true
    }

    pub fn set_active_workout(&mut self, id: Option<&str>) {
        self.active_workout_id = id.map(str::to_string);
        self.persist();
    }

    /// Rename the draft or a saved workout. Empty or clashing names are
    /// ignored.
    pub fn update_workout_name(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if !is_name_unique(name, &self.workouts, self.draft_workout.as_ref(), Some(id)) {
            tracing::debug!(id, reason = "invalid_or_duplicate_name", "rename ignored");
            return false;
        }
        let target = match self.draft_workout.as_mut().filter(|d| d.id == id) {
            Some(draft) => Some(draft),
            None => self.workouts.iter_mut().find(|w| w.id == id),
        };
        let Some(workout) = target else {
            tracing::debug!(id, reason = "not_found", "rename ignored");
            return false;
        };
        workout.name = name.to_string();
        self.persist();
        true
    }

    // ── Tree edits on the active workout ─────────────────────────────

    /// Append a default node under `parent_id`. Returns the new node's id.
    pub fn add_node(&mut self, parent_id: &str, kind: NodeKind) -> Option<String> {
        self.edit_active("add_node", |root| tree::add_node(root, parent_id, kind))
    }

    pub fn update_node(&mut self, id: &str, patch: &NodePatch) -> bool {
        self.edit_active("update_node", |root| {
            tree::update_node(root, id, patch).map(|next| (next, ()))
        })
        .is_some()
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        self.edit_active("delete_node", |root| {
            tree::delete_node(root, id).map(|next| (next, ()))
        })
        .is_some()
    }

    /// Reorder among siblings. Moves across loops are ignored.
    pub fn move_node(&mut self, active_id: &str, over_id: &str) -> bool {
        self.edit_active("move_node", |root| {
            tree::move_node(root, active_id, over_id).map(|next| (next, ()))
        })
        .is_some()
    }

    // ── Runner ───────────────────────────────────────────────────────

    /// Snapshot the active workout's queue and begin the countdown.
    pub fn start_runner(&mut self) -> Option<RunnerEvent> {
        let Some(workout) = self.active_workout().workout() else {
            tracing::debug!(reason = "no_active_workout", "runner start ignored");
            return None;
        };
        let queue = workout.queue();
        self.apply_runner(|runner| runner.start(queue))
    }

    pub fn tick(&mut self) -> Option<RunnerEvent> {
        self.apply_runner(Runner::tick)
    }

    pub fn toggle_pause(&mut self) -> Option<RunnerEvent> {
        self.apply_runner(Runner::toggle_pause)
    }

    pub fn exit_runner(&mut self) -> Option<RunnerEvent> {
        self.apply_runner(Runner::exit)
    }

    /// Mute is not persisted, so this never writes to storage.
    pub fn toggle_mute(&mut self) -> Option<RunnerEvent> {
        self.runner.toggle_mute()
    }

    pub fn skip_to_next(&mut self) -> Option<RunnerEvent> {
        self.apply_runner(Runner::skip_to_next)
    }

    pub fn skip_to_previous(&mut self) -> Option<RunnerEvent> {
        self.apply_runner(Runner::skip_to_previous)
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_sound_preset(&mut self, preset: SoundPreset) {
        self.sound_preset = preset;
        self.persist();
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.persist();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist store");
        }
    }

    fn apply_runner(
        &mut self,
        command: impl FnOnce(&mut Runner) -> Option<RunnerEvent>,
    ) -> Option<RunnerEvent> {
        let event = command(&mut self.runner)?;
        self.persist();
        Some(event)
    }

    fn active_slot(&self) -> Option<ActiveSlot> {
        match self.active_workout() {
            ActiveWorkout::Draft(_) => Some(ActiveSlot::Draft),
            ActiveWorkout::Saved(w) => self
                .workouts
                .iter()
                .position(|s| s.id == w.id)
                .map(ActiveSlot::Saved),
            ActiveWorkout::None => None,
        }
    }

    fn slot_mut(&mut self, slot: ActiveSlot) -> Option<&mut Workout> {
        match slot {
            ActiveSlot::Draft => self.draft_workout.as_mut(),
            ActiveSlot::Saved(i) => self.workouts.get_mut(i),
        }
    }

    /// Run `edit` on the active tree and swap in the new snapshot.
    fn edit_active<T>(
        &mut self,
        op: &'static str,
        edit: impl FnOnce(&LoopNode) -> Option<(LoopNode, T)>,
    ) -> Option<T> {
        let Some(slot) = self.active_slot() else {
            tracing::debug!(op, reason = "no_active_workout", "edit ignored");
            return None;
        };
        let workout = self.slot_mut(slot)?;
        let Some((next, out)) = edit(&workout.root_node) else {
            tracing::debug!(op, reason = "not_applicable", "edit ignored");
            return None;
        };
        workout.root_node = next;
        self.persist();
        Some(out)
    }
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for TimerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerStore")
            .field("workouts", &self.workouts.len())
            .field("active_workout_id", &self.active_workout_id)
            .field("has_draft", &self.draft_workout.is_some())
            .field("runner", &self.runner.status())
            .finish_non_exhaustive()
    }
}
