use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TimerKind;

/// Everything a timer reports to the outside world.
///
/// Ticks only ever produce `Snapshot` and `TimerCompleted`; the other
/// variants answer explicit commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        run_id: Uuid,
        kind: TimerKind,
        at: DateTime<Utc>,
    },
    Snapshot {
        kind: TimerKind,
        /// Final display string, e.g. `"Round 2 - Rest: 7s"`.
        display: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phase_index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        remaining_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        kind: TimerKind,
        message: String,
        at: DateTime<Utc>,
    },
    TimerStopped {
        kind: TimerKind,
        at: DateTime<Utc>,
    },
    TimerResumed {
        kind: TimerKind,
        at: DateTime<Utc>,
    },
    TimerReset {
        kind: TimerKind,
        at: DateTime<Utc>,
    },
    PlayerSwitched {
        /// Zero-based index of the player whose clock now runs.
        active: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub(crate) fn snapshot(kind: TimerKind, display: String) -> Self {
        Event::Snapshot {
            kind,
            display,
            phase_index: None,
            remaining_secs: None,
            at: Utc::now(),
        }
    }

    pub(crate) fn completed(kind: TimerKind, message: impl Into<String>) -> Self {
        Event::TimerCompleted {
            kind,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// Display text carried by snapshots.
    pub fn display(&self) -> Option<&str> {
        match self {
            Event::Snapshot { display, .. } => Some(display),
            _ => None,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Event::TimerCompleted { .. })
    }
}
