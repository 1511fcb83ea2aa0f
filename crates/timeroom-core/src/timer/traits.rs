use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::kind::TimerKind;
use crate::events::Event;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Stopped mid-run; position is kept so the run can resume.
    Paused,
    /// Terminal until an explicit reset.
    Completed,
}

/// A tick-driven timer.
///
/// Implementations never block and never do I/O (apart from the sound
/// loop's fire-and-forget cue). The caller decides when `tick()` runs.
/// Every command returns the events it produced; an empty result means the
/// command did not apply in the current state and was ignored.
pub trait Timer: Send {
    fn kind(&self) -> TimerKind;

    fn state(&self) -> TimerState;

    /// Begin a fresh run. A run already in progress is restarted.
    fn start(&mut self) -> Vec<Event>;

    /// Advance by one period.
    fn tick(&mut self) -> Vec<Event>;

    /// Halt without losing position. Repeated calls are no-ops.
    fn stop(&mut self) -> Option<Event>;

    /// Continue a stopped run.
    fn resume(&mut self) -> Option<Event>;

    /// Back to idle at the beginning.
    fn reset(&mut self) -> Vec<Event>;

    /// Hand the clock to the other player. Only the chess clock has players.
    fn switch_active(&mut self) -> Option<Event> {
        None
    }

    /// Current display without advancing.
    fn snapshot(&self) -> Option<Event>;

    fn tick_period(&self) -> Duration {
        DEFAULT_TICK_PERIOD
    }

    fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }
}
