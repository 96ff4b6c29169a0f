mod engine;
mod sound;

pub use engine::{Runner, RunnerStatus, COUNTDOWN_DURATION, REWIND_THRESHOLD_SECS};
pub use sound::{select_cue, AudioOutput, SilentOutput, SoundCue, TICK_WINDOW_SECS};
