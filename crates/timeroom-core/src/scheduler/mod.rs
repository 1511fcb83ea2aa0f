//! Periodic tick source and the loop that drives a [`Session`].
//!
//! There is never more than one live tick source: [`TickScheduler`] holds at
//! most one interval, and scheduling a new period drops the old one first.
//! [`drive`] runs commands and ticks on a single task, so once a stop or
//! reset has been handled no further tick can reach the timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::render::Renderer;
use crate::session::{Command, Session};

#[derive(Debug, Default)]
pub struct TickScheduler {
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick every `period`, first one a full period from now. Any previous
    /// schedule is cancelled.
    pub fn schedule_periodic(&mut self, period: Duration) {
        self.cancel();
        let period = period.max(Duration::from_millis(1));
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Idempotent.
    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next tick. Pends forever while nothing is scheduled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Why [`drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The timer reached its terminal state.
    Completed,
    /// A [`Command::Quit`] was received.
    Quit,
    /// The command channel closed while nothing was ticking.
    Idle,
}

/// Run `session` until its timer completes, a quit arrives, or there is
/// nothing left to do.
///
/// Commands may arrive at any time. After each command the schedule is
/// rebuilt from scratch when the timer is running (so a restart or a chess
/// clock switch gets a full period) and cancelled otherwise.
pub async fn drive<R: Renderer>(
    session: &mut Session<R>,
    commands: &mut mpsc::Receiver<Command>,
) -> DriveOutcome {
    let mut scheduler = TickScheduler::new();
    let mut commands_open = true;
    reschedule(session, &mut scheduler);

    loop {
        if !commands_open && !scheduler.is_scheduled() {
            return if session.is_completed() {
                DriveOutcome::Completed
            } else {
                DriveOutcome::Idle
            };
        }

        tokio::select! {
            biased;

            command = commands.recv(), if commands_open => {
                let Some(command) = command else {
                    tracing::debug!("command channel closed");
                    commands_open = false;
                    continue;
                };
                tracing::debug!(?command, "command received");
                let quit = matches!(command, Command::Quit);
                session.apply(command);
                if quit {
                    scheduler.cancel();
                    return DriveOutcome::Quit;
                }
                reschedule(session, &mut scheduler);
            }

            () = scheduler.tick() => {
                session.tick();
                if !session.is_ticking() {
                    scheduler.cancel();
                    if session.is_completed() {
                        return DriveOutcome::Completed;
                    }
                }
            }
        }
    }
}

fn reschedule<R: Renderer>(session: &Session<R>, scheduler: &mut TickScheduler) {
    match session.tick_period() {
        Some(period) if session.is_ticking() => scheduler.schedule_periodic(period),
        _ => scheduler.cancel(),
    }
}
