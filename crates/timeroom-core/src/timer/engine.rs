//! Countdown engine for phase-sequenced timers.
//!
//! A tick-driven state machine. It does not use internal threads or clocks -
//! the caller is responsible for calling `tick()` once per period.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> Completed
//!   ^                                           |
//!   +------------------- reset -----------------+
//! ```
//!
//! ## Tick ordering
//!
//! Each tick shows the current second and only then counts it down, so a
//! phase of `n` seconds is shown `n + 1` times (`n`, `n-1`, ..., `0`). The
//! tick that shows the final `0` also reports completion.
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(TimerConfig::Countdown { seconds: 3 }.build()?);
//! engine.start();
//! // Once per second:
//! for event in engine.tick() { render(&event) }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::TimerKind;
use super::phase::TimerPlan;
use super::traits::{Timer, TimerState};
use crate::events::Event;

/// Position of one run within its plan. Owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub phase_index: usize,
    pub seconds_remaining: u64,
    pub status: TimerState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    plan: TimerPlan,
    run: RunState,
    #[serde(default)]
    run_id: Option<Uuid>,
}

impl CountdownEngine {
    /// Create an idle engine positioned at the first phase.
    pub fn new(plan: TimerPlan) -> Self {
        let run = Self::idle_state(&plan);
        Self {
            plan,
            run,
            run_id: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn phase_index(&self) -> usize {
        self.run.phase_index
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.run.seconds_remaining
    }

    pub fn plan(&self) -> &TimerPlan {
        &self.plan
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn idle_state(plan: &TimerPlan) -> RunState {
        RunState {
            phase_index: 0,
            seconds_remaining: plan.sequence.first().duration_secs,
            status: TimerState::Idle,
        }
    }

    fn current_snapshot(&self) -> Event {
        Event::Snapshot {
            kind: self.plan.kind,
            display: self
                .plan
                .display(self.run.phase_index, self.run.seconds_remaining),
            phase_index: Some(self.run.phase_index),
            remaining_secs: Some(self.run.seconds_remaining),
            at: Utc::now(),
        }
    }

    /// Count the shown second down, moving to the next phase or finishing
    /// once the current one is exhausted.
    fn advance(&mut self) -> Option<Event> {
        if self.run.seconds_remaining > 0 {
            self.run.seconds_remaining -= 1;
            return None;
        }

        if self.plan.sequence.is_last(self.run.phase_index) {
            self.run.status = TimerState::Completed;
            tracing::info!(
                kind = %self.plan.kind,
                run_id = ?self.run_id,
                "timer completed"
            );
            return Some(Event::completed(
                self.plan.kind,
                self.plan.completion_message.clone(),
            ));
        }

        self.run.phase_index += 1;
        self.run.seconds_remaining = self
            .plan
            .sequence
            .get(self.run.phase_index)
            .map(|p| p.duration_secs)
            .unwrap_or(0);
        tracing::debug!(
            phase_index = self.run.phase_index,
            duration_secs = self.run.seconds_remaining,
            "phase advanced"
        );
        None
    }
}

impl Timer for CountdownEngine {
    fn kind(&self) -> TimerKind {
        self.plan.kind
    }

    fn state(&self) -> TimerState {
        self.run.status
    }

    fn start(&mut self) -> Vec<Event> {
        if self.run.status == TimerState::Running {
            tracing::debug!(kind = %self.plan.kind, "restarting active run");
        }
        let run_id = Uuid::new_v4();
        self.run = RunState {
            status: TimerState::Running,
            ..Self::idle_state(&self.plan)
        };
        self.run_id = Some(run_id);
        tracing::debug!(
            kind = %self.plan.kind,
            %run_id,
            phases = self.plan.sequence.len(),
            "timer started"
        );
        vec![Event::TimerStarted {
            run_id,
            kind: self.plan.kind,
            at: Utc::now(),
        }]
    }

    fn tick(&mut self) -> Vec<Event> {
        if self.run.status != TimerState::Running {
            return Vec::new();
        }
        let mut events = vec![self.current_snapshot()];
        events.extend(self.advance());
        events
    }

    fn stop(&mut self) -> Option<Event> {
        match self.run.status {
            TimerState::Running => {
                self.run.status = TimerState::Paused;
                Some(Event::TimerStopped {
                    kind: self.plan.kind,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    fn resume(&mut self) -> Option<Event> {
        match self.run.status {
            TimerState::Paused => {
                self.run.status = TimerState::Running;
                Some(Event::TimerResumed {
                    kind: self.plan.kind,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    fn reset(&mut self) -> Vec<Event> {
        self.run = Self::idle_state(&self.plan);
        self.run_id = None;
        vec![
            Event::TimerReset {
                kind: self.plan.kind,
                at: Utc::now(),
            },
            self.current_snapshot(),
        ]
    }

    fn snapshot(&self) -> Option<Event> {
        match self.run.status {
            TimerState::Completed => None,
            _ => Some(self.current_snapshot()),
        }
    }
}
