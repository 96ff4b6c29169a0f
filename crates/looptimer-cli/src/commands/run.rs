//! Foreground playback.
//!
//! A single task owns the store. A one-second interval drives `tick` and
//! stdin lines drive the navigation commands, multiplexed with
//! `tokio::select!`, so runner access is never concurrent.

use std::io::Write;
use std::time::Duration;

use looptimer_core::format::format_time;
use looptimer_core::{
    AudioOutput, Config, RunnerEvent, RunnerStatus, SoundCue, SoundPreset, TimerStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use super::{ensure, open_store, CmdResult};

const HELP: &str = "p pause/resume · n next · b back · m mute · q quit";

/// Rings the terminal bell on stderr.
struct TerminalBell {
    enabled: bool,
    preset: SoundPreset,
}

impl TerminalBell {
    fn rings(&self, cue: SoundCue) -> usize {
        match (self.preset, cue) {
            (SoundPreset::Minimal, SoundCue::LeadIn | SoundCue::Tick) => 0,
            (SoundPreset::Soft, SoundCue::LeadIn) => 0,
            (_, SoundCue::Switch) => 2,
            _ => 1,
        }
    }
}

impl AudioOutput for TerminalBell {
    fn initialize_output(&mut self) {
        tracing::debug!(enabled = self.enabled, preset = %self.preset, "terminal bell ready");
    }

    fn set_preset(&mut self, preset: SoundPreset) {
        self.preset = preset;
    }

    fn play_cue(&mut self, cue: SoundCue) {
        tracing::trace!(?cue, "cue");
        if !self.enabled {
            return;
        }
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all("\x07".repeat(self.rings(cue)).as_bytes());
        let _ = stderr.flush();
    }
}

fn emit(event: &RunnerEvent) -> CmdResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn show_upcoming(store: &TimerStore) {
    let runner = store.runner();
    let Some(current) = runner.current_event() else {
        return;
    };
    let next = runner
        .next_event()
        .map(|e| e.label.as_str())
        .unwrap_or("finish");
    eprintln!(
        "now: {} ({})  next: {}",
        current.label,
        format_time(current.duration),
        next
    );
}

/// Whether the tick source must restart its one-second phase: true when the
/// runner goes from not ticking to ticking.
fn restarts_tick_source(before: RunnerStatus, after: RunnerStatus) -> bool {
    !before.is_ticking() && after.is_ticking()
}

pub fn run(workout: Option<String>) -> CmdResult {
    let config = Config::load_or_default();
    let mut store = open_store()?;

    if let Some(id) = workout.as_deref() {
        let known = store.draft_workout().is_some_and(|d| d.id == id)
            || store.workouts().iter().any(|w| w.id == id);
        ensure(known, format!("workout not found: {id}"))?;
        store.set_active_workout(Some(id));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(&mut store, &config))?;

    store.flush()?;
    Ok(())
}

async fn drive(store: &mut TimerStore, config: &Config) -> CmdResult {
    // A recovered run comes back paused and waits for `p`.
    match store.runner().status() {
        RunnerStatus::Idle | RunnerStatus::Completed => {
            let Some(event) = store.start_runner() else {
                return Err("nothing to run: no active workout or it has no intervals".into());
            };
            emit(&event)?;
        }
        _ => emit(&store.runner().snapshot())?,
    }
    eprintln!("{HELP}");

    let mut bell = TerminalBell {
        enabled: config.runner.bell,
        preset: store.sound_preset(),
    };
    bell.initialize_output();
    bell.set_preset(store.sound_preset());

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let before = store.runner().status();
        tokio::select! {
            _ = interval.tick() => {
                if let Some(cue) = store.runner().cue() {
                    bell.play_cue(cue);
                }
                if let Some(event) = store.tick() {
                    if !matches!(event, RunnerEvent::Ticked { .. }) {
                        emit(&event)?;
                    }
                    if config.runner.show_upcoming
                        && matches!(event, RunnerEvent::EventStarted { .. })
                    {
                        show_upcoming(store);
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                let event = match line?.as_deref().map(str::trim) {
                    None => {
                        stdin_open = false;
                        None
                    }
                    Some("p") => store.toggle_pause(),
                    Some("n") => store.skip_to_next(),
                    Some("b") => store.skip_to_previous(),
                    Some("m") => store.toggle_mute(),
                    Some("q") => store.exit_runner(),
                    Some("") => None,
                    Some(other) => {
                        tracing::warn!(input = other, "unknown command");
                        eprintln!("{HELP}");
                        None
                    }
                };
                if let Some(event) = event {
                    emit(&event)?;
                }
            }
        }

        let after = store.runner().status();
        if restarts_tick_source(before, after) {
            interval.reset();
        }
        match after {
            RunnerStatus::Idle | RunnerStatus::Completed => break,
            RunnerStatus::Paused if !stdin_open => {
                tracing::info!("stdin closed while paused, leaving the run paused");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
