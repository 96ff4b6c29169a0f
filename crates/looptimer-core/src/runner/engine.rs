//! Runner state machine.
//!
//! The runner plays a flattened queue one second at a time. It has no
//! internal thread and no clock: the host fires exactly one `tick()` per
//! second while the runner is in `Countdown` or `Running`, and a missed
//! tick is simply a lost second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Countdown -> Running -> Completed
//!             |           ^  |
//!             +-> Paused -+  +-> Paused
//! ```
//!
//! Resuming always lands in `Running`, even when the pause happened during
//! the countdown.
//!
//! ## Usage
//!
//! ```ignore
//! let mut runner = Runner::new();
//! runner.start(flatten_loop(&workout.root_node));
//! // Once per second:
//! runner.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::sound::{select_cue, SoundCue};
use crate::events::RunnerEvent;
use crate::tree::{total_duration, PlayableEvent};

/// Lead-in length in seconds.
pub const COUNTDOWN_DURATION: u64 = 5;

/// Seconds into an event after which "previous" rewinds the event itself
/// instead of jumping back.
pub const REWIND_THRESHOLD_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerStatus {
    #[default]
    Idle,
    Countdown,
    Running,
    Paused,
    Completed,
}

impl RunnerStatus {
    /// Whether the host's tick source should be firing.
    pub fn is_ticking(self) -> bool {
        matches!(self, RunnerStatus::Countdown | RunnerStatus::Running)
    }
}

/// Core runner.
///
/// The queue is a private snapshot taken at start; later tree edits never
/// reach it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Runner {
    status: RunnerStatus,
    queue: Vec<PlayableEvent>,
    index: usize,
    /// Seconds left in the countdown or the current event.
    remaining: u64,
    is_muted: bool,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a runner from persisted parts. Mute is not persisted.
    pub fn from_parts(
        status: RunnerStatus,
        queue: Vec<PlayableEvent>,
        index: usize,
        remaining: u64,
    ) -> Self {
        Self {
            status,
            queue,
            index,
            remaining,
            is_muted: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> RunnerStatus {
        self.status
    }

    pub fn queue(&self) -> &[PlayableEvent] {
        &self.queue
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn current_event(&self) -> Option<&PlayableEvent> {
        self.queue.get(self.index)
    }

    pub fn next_event(&self) -> Option<&PlayableEvent> {
        self.queue.get(self.index + 1)
    }

    pub fn total_duration(&self) -> u64 {
        total_duration(&self.queue)
    }

    /// Seconds of the queue already played. Zero before the first event.
    pub fn elapsed_duration(&self) -> u64 {
        match self.status {
            RunnerStatus::Idle | RunnerStatus::Countdown => 0,
            _ => {
                let done = total_duration(self.queue.get(..self.index).unwrap_or(&self.queue));
                let current = self
                    .current_event()
                    .map(|e| e.duration.saturating_sub(self.remaining))
                    .unwrap_or(0);
                done + current
            }
        }
    }

    /// Cue the host should play before the coming tick, honouring mute.
    pub fn cue(&self) -> Option<SoundCue> {
        if self.is_muted {
            return None;
        }
        select_cue(self.status, self.remaining)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> RunnerEvent {
        let event = self.current_event();
        RunnerEvent::StateSnapshot {
            status: self.status,
            index: self.index,
            label: event.map(|e| e.label.clone()),
            kind: event.map(|e| e.kind),
            remaining: self.remaining,
            queue_len: self.queue.len(),
            total_secs: self.total_duration(),
            elapsed_secs: self.elapsed_duration(),
            is_muted: self.is_muted,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load `queue` and begin the lead-in countdown. An empty queue cannot
    /// be started and leaves the runner untouched.
    pub fn start(&mut self, queue: Vec<PlayableEvent>) -> Option<RunnerEvent> {
        if queue.is_empty() {
            tracing::debug!(reason = "empty_queue", "runner start ignored");
            return None;
        }
        self.queue = queue;
        self.index = 0;
        self.remaining = COUNTDOWN_DURATION;
        self.status = RunnerStatus::Countdown;
        tracing::debug!(events = self.queue.len(), "runner countdown started");
        Some(RunnerEvent::Started {
            queue_len: self.queue.len(),
            total_secs: self.total_duration(),
            at: Utc::now(),
        })
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<RunnerEvent> {
        match self.status {
            RunnerStatus::Countdown => {
                if self.remaining > 1 {
                    self.remaining -= 1;
                    Some(self.ticked())
                } else {
                    self.status = RunnerStatus::Running;
                    self.enter(0)
                }
            }
            RunnerStatus::Running => {
                if self.remaining > 1 {
                    self.remaining -= 1;
                    Some(self.ticked())
                } else {
                    self.advance()
                }
            }
            _ => None,
        }
    }

    /// Pause while counting down or running; resume to running when paused.
    pub fn toggle_pause(&mut self) -> Option<RunnerEvent> {
        match self.status {
            RunnerStatus::Running | RunnerStatus::Countdown => {
                self.status = RunnerStatus::Paused;
                tracing::debug!(remaining = self.remaining, "runner paused");
                Some(RunnerEvent::Paused {
                    remaining: self.remaining,
                    at: Utc::now(),
                })
            }
            RunnerStatus::Paused => {
                self.status = RunnerStatus::Running;
                tracing::debug!(remaining = self.remaining, "runner resumed");
                Some(RunnerEvent::Resumed {
                    remaining: self.remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Leave the run and drop the queue.
    pub fn exit(&mut self) -> Option<RunnerEvent> {
        if self.status == RunnerStatus::Idle {
            return None;
        }
        self.status = RunnerStatus::Idle;
        self.queue.clear();
        self.index = 0;
        self.remaining = 0;
        tracing::debug!("runner exited");
        Some(RunnerEvent::Exited { at: Utc::now() })
    }

    pub fn toggle_mute(&mut self) -> Option<RunnerEvent> {
        self.is_muted = !self.is_muted;
        Some(RunnerEvent::MuteToggled {
            muted: self.is_muted,
            at: Utc::now(),
        })
    }

    /// Cut the lead-in short, or finish the current event now.
    pub fn skip_to_next(&mut self) -> Option<RunnerEvent> {
        match self.status {
            RunnerStatus::Idle | RunnerStatus::Completed => None,
            RunnerStatus::Countdown => {
                self.status = RunnerStatus::Running;
                self.enter(0)
            }
            RunnerStatus::Running | RunnerStatus::Paused => self.advance(),
        }
    }

    /// Restart the lead-in, rewind the current event, or step back one
    /// event depending on how far in we are.
    pub fn skip_to_previous(&mut self) -> Option<RunnerEvent> {
        match self.status {
            RunnerStatus::Idle | RunnerStatus::Completed => None,
            RunnerStatus::Countdown => Some(self.restart_countdown()),
            RunnerStatus::Running | RunnerStatus::Paused => {
                if let Some(duration) = self.current_event().map(|e| e.duration) {
                    if duration.saturating_sub(self.remaining) > REWIND_THRESHOLD_SECS {
                        self.remaining = duration;
                        return Some(RunnerEvent::EventRestarted {
                            index: self.index,
                            duration,
                            at: Utc::now(),
                        });
                    }
                }
                match self.index.checked_sub(1) {
                    Some(prev) => self.enter(prev),
                    None => {
                        self.status = RunnerStatus::Countdown;
                        Some(self.restart_countdown())
                    }
                }
            }
        }
    }

    /// Recovery applied once after loading persisted state: a stale
    /// countdown starts over, a run in progress comes back paused.
    pub fn recover(&mut self) {
        match self.status {
            RunnerStatus::Countdown => self.remaining = COUNTDOWN_DURATION,
            RunnerStatus::Running => self.status = RunnerStatus::Paused,
            _ => {}
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ticked(&self) -> RunnerEvent {
        RunnerEvent::Ticked {
            status: self.status,
            remaining: self.remaining,
            at: Utc::now(),
        }
    }

    fn restart_countdown(&mut self) -> RunnerEvent {
        self.index = 0;
        self.remaining = COUNTDOWN_DURATION;
        RunnerEvent::CountdownRestarted {
            remaining: self.remaining,
            at: Utc::now(),
        }
    }

    /// Make `index` the current event with its full duration.
    fn enter(&mut self, index: usize) -> Option<RunnerEvent> {
        let event = self.queue.get(index)?;
        self.index = index;
        self.remaining = event.duration;
        tracing::debug!(index, label = %event.label, "runner event started");
        Some(RunnerEvent::EventStarted {
            index,
            label: event.label.clone(),
            kind: event.kind,
            duration: event.duration,
            at: Utc::now(),
        })
    }

    /// Move past the current event, completing the run after the last one.
    fn advance(&mut self) -> Option<RunnerEvent> {
        let next = self.index + 1;
        if next >= self.queue.len() {
            self.status = RunnerStatus::Completed;
            self.remaining = 0;
            tracing::debug!("runner completed");
            return Some(RunnerEvent::Completed {
                total_secs: self.total_duration(),
                at: Utc::now(),
            });
        }
        self.enter(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::EventType;

    fn event(duration: u64, label: &str) -> PlayableEvent {
        PlayableEvent {
            duration,
            label: label.into(),
            kind: EventType::Work,
        }
    }

    fn two_events() -> Vec<PlayableEvent> {
        vec![event(2, "Work 1"), event(1, "Rest 1")]
    }

    fn running(queue: Vec<PlayableEvent>) -> Runner {
        let mut runner = Runner::new();
        runner.start(queue);
        runner.skip_to_next();
        runner
    }

    #[test]
    fn start_enters_countdown() {
        let mut runner = Runner::new();
        assert!(runner.start(two_events()).is_some());
        assert_eq!(runner.status(), RunnerStatus::Countdown);
        assert_eq!(runner.remaining(), COUNTDOWN_DURATION);
        assert_eq!(runner.index(), 0);
    }

    #[test]
    fn empty_queue_cannot_start() {
        let mut runner = Runner::new();
        assert!(runner.start(Vec::new()).is_none());
        assert_eq!(runner, Runner::new());
    }

    #[test]
    fn countdown_hands_over_to_first_event() {
        let mut runner = Runner::new();
        runner.start(two_events());
        for _ in 0..COUNTDOWN_DURATION - 1 {
            runner.tick();
            assert_eq!(runner.status(), RunnerStatus::Countdown);
        }
        assert_eq!(runner.remaining(), 1);
        runner.tick();
        assert_eq!(runner.status(), RunnerStatus::Running);
        assert_eq!(runner.remaining(), 2);
        assert_eq!(runner.index(), 0);
    }

    #[test]
    fn reaching_zero_moves_to_next_event() {
        let mut runner = running(two_events());
        runner.tick();
        assert_eq!(runner.remaining(), 1);
        runner.tick();
        assert_eq!(runner.index(), 1);
        assert_eq!(runner.remaining(), 1);
    }

    #[test]
    fn last_event_completes() {
        let mut runner = running(two_events());
        runner.tick();
        runner.tick();
        let event = runner.tick();
        assert!(matches!(event, Some(RunnerEvent::Completed { total_secs: 3, .. })));
        assert_eq!(runner.status(), RunnerStatus::Completed);
        assert_eq!(runner.remaining(), 0);
        assert_eq!(runner.elapsed_duration(), 3);
    }

    #[test]
    fn tick_is_ignored_when_not_ticking() {
        let mut idle = Runner::new();
        assert!(idle.tick().is_none());

        let mut runner = running(two_events());
        runner.toggle_pause();
        let before = runner.clone();
        assert!(runner.tick().is_none());
        assert_eq!(runner, before);
    }

    #[test]
    fn pause_during_countdown_resumes_running() {
        let mut runner = Runner::new();
        runner.start(two_events());
        runner.tick();
        runner.toggle_pause();
        assert_eq!(runner.status(), RunnerStatus::Paused);
        assert_eq!(runner.remaining(), 4);
        runner.toggle_pause();
        assert_eq!(runner.status(), RunnerStatus::Running);
        assert_eq!(runner.remaining(), 4);
    }

    #[test]
    fn exit_clears_everything() {
        let mut runner = running(two_events());
        assert!(runner.exit().is_some());
        assert_eq!(runner.status(), RunnerStatus::Idle);
        assert!(runner.queue().is_empty());
        assert_eq!(runner.index(), 0);
        assert_eq!(runner.remaining(), 0);
        assert!(runner.exit().is_none());
    }

    #[test]
    fn completed_run_can_restart() {
        let mut runner = running(vec![event(1, "Only")]);
        runner.tick();
        assert_eq!(runner.status(), RunnerStatus::Completed);
        runner.start(vec![event(1, "Only")]);
        assert_eq!(runner.status(), RunnerStatus::Countdown);
        assert_eq!(runner.remaining(), COUNTDOWN_DURATION);
    }

    #[test]
    fn skip_next_from_countdown_and_running() {
        let mut runner = Runner::new();
        runner.start(two_events());
        runner.skip_to_next();
        assert_eq!(runner.status(), RunnerStatus::Running);
        assert_eq!(runner.remaining(), 2);

        runner.skip_to_next();
        assert_eq!(runner.index(), 1);
        assert_eq!(runner.remaining(), 1);

        runner.skip_to_next();
        assert_eq!(runner.status(), RunnerStatus::Completed);
        assert!(runner.skip_to_next().is_none());
    }

    #[test]
    fn skip_previous_restarts_countdown() {
        let mut runner = Runner::new();
        runner.start(two_events());
        runner.tick();
        runner.tick();
        runner.skip_to_previous();
        assert_eq!(runner.status(), RunnerStatus::Countdown);
        assert_eq!(runner.remaining(), COUNTDOWN_DURATION);
    }

    #[test]
    fn skip_previous_rewinds_after_threshold() {
        let mut runner = running(vec![event(10, "Long"), event(10, "Longer")]);
        runner.skip_to_next();
        for _ in 0..4 {
            runner.tick();
        }
        assert_eq!(runner.remaining(), 6);
        let event = runner.skip_to_previous();
        assert!(matches!(event, Some(RunnerEvent::EventRestarted { index: 1, .. })));
        assert_eq!(runner.index(), 1);
        assert_eq!(runner.remaining(), 10);
    }

    #[test]
    fn skip_previous_steps_back_within_threshold() {
        let mut runner = running(vec![event(10, "A"), event(10, "B")]);
        runner.skip_to_next();
        for _ in 0..3 {
            runner.tick();
        }
        runner.skip_to_previous();
        assert_eq!(runner.index(), 0);
        assert_eq!(runner.remaining(), 10);
    }

    #[test]
    fn skip_previous_on_first_event_returns_to_countdown() {
        let mut runner = running(two_events());
        runner.skip_to_previous();
        assert_eq!(runner.status(), RunnerStatus::Countdown);
        assert_eq!(runner.remaining(), COUNTDOWN_DURATION);
        assert_eq!(runner.index(), 0);
    }

    #[test]
    fn elapsed_counts_finished_and_current() {
        let mut runner = running(vec![event(5, "A"), event(7, "B"), event(3, "C")]);
        assert_eq!(runner.total_duration(), 15);
        runner.skip_to_next();
        runner.tick();
        runner.tick();
        assert_eq!(runner.elapsed_duration(), 5 + 2);
    }

    #[test]
    fn elapsed_is_zero_during_countdown() {
        let mut runner = Runner::new();
        runner.start(two_events());
        assert_eq!(runner.elapsed_duration(), 0);
        assert_eq!(runner.total_duration(), 3);
    }

    #[test]
    fn mute_silences_cues() {
        let mut runner = Runner::new();
        runner.start(two_events());
        assert_eq!(runner.cue(), Some(SoundCue::LeadIn));
        runner.toggle_mute();
        assert!(runner.is_muted());
        assert_eq!(runner.cue(), None);
        assert_eq!(runner.status(), RunnerStatus::Countdown);
    }

    #[test]
    fn recover_resets_countdown_and_pauses_running() {
        let mut countdown =
            Runner::from_parts(RunnerStatus::Countdown, two_events(), 0, 2);
        countdown.recover();
        assert_eq!(countdown.status(), RunnerStatus::Countdown);
        assert_eq!(countdown.remaining(), COUNTDOWN_DURATION);

        let mut run = Runner::from_parts(RunnerStatus::Running, two_events(), 1, 1);
        run.recover();
        assert_eq!(run.status(), RunnerStatus::Paused);
        assert_eq!(run.remaining(), 1);
        assert_eq!(run.index(), 1);
    }

    #[test]
    fn snapshot_reports_current_event() {
        let runner = running(two_events());
        match runner.snapshot() {
            RunnerEvent::StateSnapshot {
                status,
                label,
                remaining,
                total_secs,
                ..
            } => {
                assert_eq!(status, RunnerStatus::Running);
                assert_eq!(label.as_deref(), Some("Work 1"));
                assert_eq!(remaining, 2);
                assert_eq!(total_secs, 3);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
