use chrono::Utc;
use uuid::Uuid;

use super::kind::TimerKind;
use super::traits::{Timer, TimerState};
use crate::events::Event;

/// Counts whole seconds upward until paused. Never completes.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    elapsed_secs: u64,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    fn display(&self) -> Event {
        Event::Snapshot {
            kind: TimerKind::Stopwatch,
            display: format!("{}s", self.elapsed_secs),
            phase_index: None,
            remaining_secs: None,
            at: Utc::now(),
        }
    }
}

impl Timer for Stopwatch {
    fn kind(&self) -> TimerKind {
        TimerKind::Stopwatch
    }

    fn state(&self) -> TimerState {
        match (self.running, self.elapsed_secs) {
            (true, _) => TimerState::Running,
            (false, 0) => TimerState::Idle,
            (false, _) => TimerState::Paused,
        }
    }

    /// Starting keeps the elapsed count; only `reset` zeroes it.
    fn start(&mut self) -> Vec<Event> {
        self.running = true;
        vec![Event::TimerStarted {
            run_id: Uuid::new_v4(),
            kind: TimerKind::Stopwatch,
            at: Utc::now(),
        }]
    }

    fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        self.elapsed_secs += 1;
        vec![self.display()]
    }

    fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerStopped {
            kind: TimerKind::Stopwatch,
            at: Utc::now(),
        })
    }

    fn resume(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerResumed {
            kind: TimerKind::Stopwatch,
            at: Utc::now(),
        })
    }

    fn reset(&mut self) -> Vec<Event> {
        self.running = false;
        self.elapsed_secs = 0;
        vec![
            Event::TimerReset {
                kind: TimerKind::Stopwatch,
                at: Utc::now(),
            },
            self.display(),
        ]
    }

    fn snapshot(&self) -> Option<Event> {
        Some(self.display())
    }
}
