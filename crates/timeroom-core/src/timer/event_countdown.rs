//! Countdown to an absolute date and time.
//!
//! Remaining time is recomputed from the clock on every tick instead of
//! being decremented, so late or skipped ticks never accumulate drift.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::kind::TimerKind;
use super::phase::format_days_hours;
use super::traits::{Timer, TimerState};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;

pub struct EventCountdown {
    target: DateTime<Utc>,
    clock: Box<dyn Clock>,
    state: TimerState,
}

impl std::fmt::Debug for EventCountdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCountdown")
            .field("target", &self.target)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl EventCountdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self::with_clock(target, SystemClock)
    }

    pub fn with_clock(target: DateTime<Utc>, clock: impl Clock + 'static) -> Self {
        Self {
            target,
            clock: Box::new(clock),
            state: TimerState::Idle,
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Whole seconds left, floored. Zero or negative once the target passed.
    pub fn remaining_secs(&self) -> i64 {
        let millis = (self.target - self.clock.now()).num_milliseconds();
        millis.div_euclid(1000)
    }

    fn display_for(&self, remaining: i64) -> Event {
        let secs = u64::try_from(remaining).unwrap_or(0);
        Event::Snapshot {
            kind: TimerKind::Event,
            display: format_days_hours(secs),
            phase_index: None,
            remaining_secs: Some(secs),
            at: Utc::now(),
        }
    }
}

impl Timer for EventCountdown {
    fn kind(&self) -> TimerKind {
        TimerKind::Event
    }

    fn state(&self) -> TimerState {
        self.state
    }

    fn start(&mut self) -> Vec<Event> {
        self.state = TimerState::Running;
        tracing::debug!(target_at = %self.target, "event countdown started");
        vec![Event::TimerStarted {
            run_id: Uuid::new_v4(),
            kind: TimerKind::Event,
            at: Utc::now(),
        }]
    }

    fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        let remaining = self.remaining_secs();
        if remaining <= 0 {
            self.state = TimerState::Completed;
            tracing::info!(target_at = %self.target, "event reached");
            let message = TimerKind::Event.completion_message().unwrap_or_default();
            return vec![Event::completed(TimerKind::Event, message)];
        }
        vec![self.display_for(remaining)]
    }

    fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerStopped {
            kind: TimerKind::Event,
            at: Utc::now(),
        })
    }

    fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerResumed {
            kind: TimerKind::Event,
            at: Utc::now(),
        })
    }

    fn reset(&mut self) -> Vec<Event> {
        self.state = TimerState::Idle;
        let mut events = vec![Event::TimerReset {
            kind: TimerKind::Event,
            at: Utc::now(),
        }];
        events.extend(self.snapshot());
        events
    }

    fn snapshot(&self) -> Option<Event> {
        let remaining = self.remaining_secs();
        (remaining > 0).then(|| self.display_for(remaining))
    }
}
