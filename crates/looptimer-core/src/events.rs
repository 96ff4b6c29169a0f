use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runner::RunnerStatus;
use crate::tree::EventType;

/// Every runner command that changes something produces an Event.
/// Hosts print them, play cues off them, or ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunnerEvent {
    /// A run was (re)started and the lead-in countdown began.
    Started {
        queue_len: usize,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed without a phase change.
    Ticked {
        status: RunnerStatus,
        remaining: u64,
        at: DateTime<Utc>,
    },
    /// A queue entry became the current event.
    EventStarted {
        index: usize,
        label: String,
        kind: EventType,
        duration: u64,
        at: DateTime<Utc>,
    },
    /// The current event was rewound to its full duration.
    EventRestarted {
        index: usize,
        duration: u64,
        at: DateTime<Utc>,
    },
    /// The lead-in countdown went back to its full length.
    CountdownRestarted {
        remaining: u64,
        at: DateTime<Utc>,
    },
    Completed {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining: u64,
        at: DateTime<Utc>,
    },
    Exited {
        at: DateTime<Utc>,
    },
    MuteToggled {
        muted: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: RunnerStatus,
        index: usize,
        label: Option<String>,
        kind: Option<EventType>,
        remaining: u64,
        queue_len: usize,
        total_secs: u64,
        elapsed_secs: u64,
        is_muted: bool,
        at: DateTime<Utc>,
    },
}

impl RunnerEvent {
    /// Short machine name, handy for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            RunnerEvent::Started { .. } => "started",
            RunnerEvent::Ticked { .. } => "ticked",
            RunnerEvent::EventStarted { .. } => "event_started",
            RunnerEvent::EventRestarted { .. } => "event_restarted",
            RunnerEvent::CountdownRestarted { .. } => "countdown_restarted",
            RunnerEvent::Completed { .. } => "completed",
            RunnerEvent::Paused { .. } => "paused",
            RunnerEvent::Resumed { .. } => "resumed",
            RunnerEvent::Exited { .. } => "exited",
            RunnerEvent::MuteToggled { .. } => "mute_toggled",
            RunnerEvent::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
