//! Sound cue selection and the audio collaborator contract.
//!
//! The runner never renders sound. Hosts ask which cue belongs to the
//! current `(status, remaining)` pair before each tick and forward it to
//! whatever [`AudioOutput`] they own.

use serde::{Deserialize, Serialize};

use super::engine::{RunnerStatus, COUNTDOWN_DURATION};
use crate::settings::SoundPreset;

/// Seconds before the end of an event at which tick beeps begin.
pub const TICK_WINDOW_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundCue {
    /// Lead-in beep while the countdown runs.
    LeadIn,
    /// Last second of the countdown.
    Go,
    /// Closing seconds of an event.
    Tick,
    /// Last second of an event, right before the next one starts.
    Switch,
}

/// Pick the cue for the given state, if any.
pub fn select_cue(status: RunnerStatus, remaining: u64) -> Option<SoundCue> {
    match status {
        RunnerStatus::Countdown if (1..=COUNTDOWN_DURATION).contains(&remaining) => {
            if remaining == 1 {
                Some(SoundCue::Go)
            } else {
                Some(SoundCue::LeadIn)
            }
        }
        RunnerStatus::Running if (1..=TICK_WINDOW_SECS).contains(&remaining) => {
            if remaining == 1 {
                Some(SoundCue::Switch)
            } else {
                Some(SoundCue::Tick)
            }
        }
        _ => None,
    }
}

/// Audio collaborator. Implementations own all rendering.
pub trait AudioOutput {
    /// Prepare the output device. Called when a run starts.
    fn initialize_output(&mut self);

    /// Switch the tone set used for later cues.
    fn set_preset(&mut self, preset: SoundPreset);

    fn play_cue(&mut self, cue: SoundCue);
}

/// Output that drops every cue. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn initialize_output(&mut self) {}

    fn set_preset(&mut self, _preset: SoundPreset) {}

    fn play_cue(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_cues() {
        for remaining in 2..=5 {
            assert_eq!(
                select_cue(RunnerStatus::Countdown, remaining),
                Some(SoundCue::LeadIn)
            );
        }
        assert_eq!(select_cue(RunnerStatus::Countdown, 1), Some(SoundCue::Go));
        assert_eq!(select_cue(RunnerStatus::Countdown, 0), None);
        assert_eq!(select_cue(RunnerStatus::Countdown, 6), None);
    }

    #[test]
    fn running_cues() {
        assert_eq!(select_cue(RunnerStatus::Running, 3), Some(SoundCue::Tick));
        assert_eq!(select_cue(RunnerStatus::Running, 2), Some(SoundCue::Tick));
        assert_eq!(select_cue(RunnerStatus::Running, 1), Some(SoundCue::Switch));
        assert_eq!(select_cue(RunnerStatus::Running, 4), None);
        assert_eq!(select_cue(RunnerStatus::Running, 0), None);
    }

    #[test]
    fn other_states_are_silent() {
        for status in [
            RunnerStatus::Idle,
            RunnerStatus::Paused,
            RunnerStatus::Completed,
        ] {
            for remaining in 0..=6 {
                assert_eq!(select_cue(status, remaining), None);
            }
        }
    }
}
