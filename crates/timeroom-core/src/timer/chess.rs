//! Two-player chess clock.
//!
//! Two independent counters share one tick path. Only the active player's
//! counter moves; switching is an explicit command and leaves the other
//! counter exactly where it was. Either counter reaching zero freezes both.

use chrono::Utc;
use uuid::Uuid;

use super::kind::TimerKind;
use super::phase::format_minutes_seconds;
use super::traits::{Timer, TimerState};
use crate::events::Event;

#[derive(Debug, Clone)]
pub struct ChessClock {
    seconds_per_player: u64,
    remaining: [u64; 2],
    active: usize,
    state: TimerState,
}

impl ChessClock {
    pub fn new(seconds_per_player: u64) -> Self {
        Self {
            seconds_per_player,
            remaining: [seconds_per_player; 2],
            active: 0,
            state: TimerState::Idle,
        }
    }

    pub fn remaining(&self) -> [u64; 2] {
        self.remaining
    }

    /// Zero-based index of the player whose clock is running.
    pub fn active(&self) -> usize {
        self.active
    }

    fn display(&self) -> Event {
        Event::Snapshot {
            kind: TimerKind::Chess,
            display: format!(
                "Player 1: {} | Player 2: {}",
                format_minutes_seconds(self.remaining[0]),
                format_minutes_seconds(self.remaining[1])
            ),
            phase_index: None,
            remaining_secs: Some(self.remaining[self.active]),
            at: Utc::now(),
        }
    }
}

impl Timer for ChessClock {
    fn kind(&self) -> TimerKind {
        TimerKind::Chess
    }

    fn state(&self) -> TimerState {
        self.state
    }

    fn start(&mut self) -> Vec<Event> {
        self.remaining = [self.seconds_per_player; 2];
        self.active = 0;
        self.state = TimerState::Running;
        vec![
            Event::TimerStarted {
                run_id: Uuid::new_v4(),
                kind: TimerKind::Chess,
                at: Utc::now(),
            },
            self.display(),
        ]
    }

    /// Count the active clock down first, then show both.
    fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        let active = self.active;
        self.remaining[active] = self.remaining[active].saturating_sub(1);
        let mut events = vec![self.display()];
        if self.remaining[active] == 0 {
            self.state = TimerState::Completed;
            tracing::info!(player = active + 1, "chess clock flag fell");
            events.push(Event::completed(
                TimerKind::Chess,
                format!("Player {} time's up!", active + 1),
            ));
        }
        events
    }

    fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerStopped {
            kind: TimerKind::Chess,
            at: Utc::now(),
        })
    }

    fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerResumed {
            kind: TimerKind::Chess,
            at: Utc::now(),
        })
    }

    fn reset(&mut self) -> Vec<Event> {
        self.remaining = [self.seconds_per_player; 2];
        self.active = 0;
        self.state = TimerState::Idle;
        vec![
            Event::TimerReset {
                kind: TimerKind::Chess,
                at: Utc::now(),
            },
            self.display(),
        ]
    }

    /// Ignored unless a game is in progress.
    fn switch_active(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.active = 1 - self.active;
        tracing::debug!(active = self.active + 1, "player switched");
        Some(Event::PlayerSwitched {
            active: self.active,
            at: Utc::now(),
        })
    }

    fn snapshot(&self) -> Option<Event> {
        Some(self.display())
    }
}
