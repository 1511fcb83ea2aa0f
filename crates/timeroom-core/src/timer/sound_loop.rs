use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use super::kind::TimerKind;
use super::traits::{Timer, TimerState};
use crate::events::Event;
use crate::render::{AudioCue, SilentCue};

/// Plays a cue every `interval_secs`, `repeats` times.
pub struct SoundLoop {
    interval_secs: u64,
    repeats: u32,
    played: u32,
    state: TimerState,
    cue: Box<dyn AudioCue>,
}

impl std::fmt::Debug for SoundLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundLoop")
            .field("interval_secs", &self.interval_secs)
            .field("repeats", &self.repeats)
            .field("played", &self.played)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SoundLoop {
    pub fn new(interval_secs: u64, repeats: u32) -> Self {
        Self::with_cue(interval_secs, repeats, SilentCue)
    }

    pub fn with_cue(interval_secs: u64, repeats: u32, cue: impl AudioCue + 'static) -> Self {
        Self {
            interval_secs,
            repeats,
            played: 0,
            state: TimerState::Idle,
            cue: Box::new(cue),
        }
    }

    pub fn played(&self) -> u32 {
        self.played
    }
}

impl Timer for SoundLoop {
    fn kind(&self) -> TimerKind {
        TimerKind::SoundLoop
    }

    fn state(&self) -> TimerState {
        self.state
    }

    fn start(&mut self) -> Vec<Event> {
        self.played = 0;
        self.state = TimerState::Running;
        vec![Event::TimerStarted {
            run_id: Uuid::new_v4(),
            kind: TimerKind::SoundLoop,
            at: Utc::now(),
        }]
    }

    fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        let mut events = vec![Event::snapshot(
            TimerKind::SoundLoop,
            format!("Play sound! ({}/{})", self.played + 1, self.repeats),
        )];
        if let Err(err) = self.cue.play() {
            tracing::warn!(%err, "sound cue failed; continuing");
        }
        self.played += 1;
        if self.played >= self.repeats {
            self.state = TimerState::Completed;
            let message = TimerKind::SoundLoop.completion_message().unwrap_or_default();
            events.push(Event::completed(TimerKind::SoundLoop, message));
        }
        events
    }

    fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerStopped {
            kind: TimerKind::SoundLoop,
            at: Utc::now(),
        })
    }

    fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerResumed {
            kind: TimerKind::SoundLoop,
            at: Utc::now(),
        })
    }

    fn reset(&mut self) -> Vec<Event> {
        self.played = 0;
        self.state = TimerState::Idle;
        vec![Event::TimerReset {
            kind: TimerKind::SoundLoop,
            at: Utc::now(),
        }]
    }

    fn snapshot(&self) -> Option<Event> {
        None
    }

    fn tick_period(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}
