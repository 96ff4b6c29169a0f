//! Wire format of the persisted store and the recovery applied on load.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::runner::{Runner, RunnerStatus};
use crate::settings::{SoundPreset, ThemeMode};
use crate::tree::PlayableEvent;
use crate::workout::Workout;

/// Bump when the persisted shape changes incompatibly. Payloads carrying a
/// different version load as defaults.
pub const STORAGE_VERSION: u32 = 1;

/// The subset of the store that survives a restart. Mute is not part of
/// it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub active_workout_id: Option<String>,
    #[serde(default)]
    pub draft_workout: Option<Workout>,
    #[serde(default)]
    pub sound_preset: SoundPreset,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub runner_status: RunnerStatus,
    #[serde(default)]
    pub runner_queue: Vec<PlayableEvent>,
    #[serde(default)]
    pub runner_index: usize,
    #[serde(default)]
    pub time_left: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    version: u32,
}

pub fn encode(state: PersistedState) -> Result<String> {
    Ok(serde_json::to_string(&Envelope {
        state,
        version: STORAGE_VERSION,
    })?)
}

/// Decode a stored payload. Anything unreadable or from another version
/// comes back as `None` so the caller can fall back to defaults.
pub fn decode(payload: &str) -> Option<PersistedState> {
    match serde_json::from_str::<Envelope>(payload) {
        Ok(env) if env.version == STORAGE_VERSION => Some(env.state),
        Ok(env) => {
            tracing::warn!(
                found = env.version,
                expected = STORAGE_VERSION,
                "stored state has another version, using defaults"
            );
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored state is corrupt, using defaults");
            None
        }
    }
}

impl PersistedState {
    /// Rebuild the runner and apply the reload policy.
    pub fn restore_runner(&self) -> Runner {
        let consistent = self.runner_status == RunnerStatus::Idle
            || self.runner_index < self.runner_queue.len();
        if !consistent {
            tracing::warn!(
                status = ?self.runner_status,
                index = self.runner_index,
                queue_len = self.runner_queue.len(),
                "stored runner state is inconsistent, resetting to idle"
            );
            return Runner::new();
        }
        let mut runner = Runner::from_parts(
            self.runner_status,
            self.runner_queue.clone(),
            self.runner_index,
            self.time_left,
        );
        runner.recover();
        runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::COUNTDOWN_DURATION;
    use crate::tree::EventType;

    fn queue() -> Vec<PlayableEvent> {
        vec![PlayableEvent {
            duration: 30,
            label: "Work".into(),
            kind: EventType::Work,
        }]
    }

    #[test]
    fn envelope_carries_version_and_camel_case_fields() {
        let payload = encode(PersistedState::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["version"], STORAGE_VERSION);
        assert_eq!(json["state"]["soundPreset"], "default");
        assert_eq!(json["state"]["runnerStatus"], "idle");
        assert!(json["state"].get("isMuted").is_none());
    }

    #[test]
    fn decode_rejects_garbage_and_other_versions() {
        assert!(decode("invalid-json-{").is_none());
        assert!(decode(r#"{"state":{},"version":0}"#).is_none());
        assert_eq!(
            decode(r#"{"state":{},"version":1}"#),
            Some(PersistedState::default())
        );
    }

    #[test]
    fn restore_applies_reload_policy() {
        let countdown = PersistedState {
            runner_status: RunnerStatus::Countdown,
            runner_queue: queue(),
            time_left: 2,
            ..Default::default()
        };
        assert_eq!(countdown.restore_runner().remaining(), COUNTDOWN_DURATION);

        let running = PersistedState {
            runner_status: RunnerStatus::Running,
            runner_queue: queue(),
            time_left: 25,
            ..Default::default()
        };
        let runner = running.restore_runner();
        assert_eq!(runner.status(), RunnerStatus::Paused);
        assert_eq!(runner.remaining(), 25);
    }

    #[test]
    fn inconsistent_runner_resets() {
        let broken = PersistedState {
            runner_status: RunnerStatus::Running,
            runner_index: 3,
            runner_queue: queue(),
            ..Default::default()
        };
        assert_eq!(broken.restore_runner(), Runner::new());
    }
}
