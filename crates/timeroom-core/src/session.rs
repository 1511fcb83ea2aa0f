//! The single live timer.
//!
//! Only one timer is visible at a time, so there is exactly one [`Session`]
//! and it owns at most one timer. Selecting a different timer drops the
//! previous one entirely; nothing about it survives the switch.

use std::fmt;
use std::time::Duration;

use crate::events::Event;
use crate::render::Renderer;
use crate::timer::{Timer, TimerKind, TimerState};

/// What the user (or host) asks the session to do.
pub enum Command {
    Start,
    Stop,
    Resume,
    Reset,
    Switch,
    Select(Box<dyn Timer>),
    Quit,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("Start"),
            Command::Stop => f.write_str("Stop"),
            Command::Resume => f.write_str("Resume"),
            Command::Reset => f.write_str("Reset"),
            Command::Switch => f.write_str("Switch"),
            Command::Select(timer) => f.debug_tuple("Select").field(&timer.kind()).finish(),
            Command::Quit => f.write_str("Quit"),
        }
    }
}

pub struct Session<R> {
    timer: Option<Box<dyn Timer>>,
    renderer: R,
    second: Duration,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            timer: None,
            renderer,
            second: Duration::from_secs(1),
        }
    }

    /// Length of one timer second. Every timer's period is scaled by it.
    pub fn with_second(mut self, second: Duration) -> Self {
        self.second = second.max(Duration::from_millis(1));
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn kind(&self) -> Option<TimerKind> {
        self.timer.as_ref().map(|t| t.kind())
    }

    pub fn state(&self) -> TimerState {
        self.timer
            .as_ref()
            .map_or(TimerState::Idle, |t| t.state())
    }

    pub fn is_ticking(&self) -> bool {
        self.state() == TimerState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state() == TimerState::Completed
    }

    /// Period the scheduler should tick at for the current timer.
    pub fn tick_period(&self) -> Option<Duration> {
        let timer = self.timer.as_ref()?;
        let nanos = self
            .second
            .as_nanos()
            .checked_mul(timer.tick_period().as_nanos())
            .map_or(u64::MAX, |n| u64::try_from(n / 1_000_000_000).unwrap_or(u64::MAX));
        Some(Duration::from_nanos(nanos))
    }

    /// Replace the current timer. The old one is stopped and dropped.
    pub fn select(&mut self, timer: Box<dyn Timer>) {
        if let Some(mut old) = self.timer.take() {
            old.stop();
            tracing::debug!(from = %old.kind(), to = %timer.kind(), "timer switched");
        }
        self.renderer.clear();
        if let Some(event) = timer.snapshot() {
            self.renderer.event(&event);
        }
        self.timer = Some(timer);
    }

    /// Apply one command and render what it produced. Returns the events.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        if let Command::Select(timer) = command {
            self.select(timer);
            return Vec::new();
        }
        let Some(timer) = self.timer.as_mut() else {
            return Vec::new();
        };
        let events = match command {
            Command::Start => timer.start(),
            Command::Stop | Command::Quit => timer.stop().into_iter().collect(),
            Command::Resume => timer.resume().into_iter().collect(),
            Command::Reset => timer.reset(),
            Command::Switch => timer.switch_active().into_iter().collect(),
            Command::Select(_) => Vec::new(),
        };
        self.emit(&events);
        events
    }

    /// Run one tick of the current timer and render it.
    pub fn tick(&mut self) -> Vec<Event> {
        let Some(timer) = self.timer.as_mut() else {
            return Vec::new();
        };
        let events = timer.tick();
        self.emit(&events);
        events
    }

    fn emit(&mut self, events: &[Event]) {
        for event in events {
            self.renderer.event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryRenderer;
    use crate::timer::{CountdownEngine, Stopwatch, TimerConfig};

    fn countdown(seconds: u64) -> Box<dyn Timer> {
        Box::new(CountdownEngine::new(
            TimerConfig::Countdown { seconds }.build().unwrap(),
        ))
    }

    #[test]
    fn commands_without_timer_are_ignored() {
        let mut session = Session::new(MemoryRenderer::new());
        assert!(session.apply(Command::Start).is_empty());
        assert!(session.tick().is_empty());
        assert_eq!(session.tick_period(), None);
    }

    #[test]
    fn select_replaces_and_clears() {
        let mut session = Session::new(MemoryRenderer::new());
        session.select(countdown(5));
        session.apply(Command::Start);
        session.tick();
        assert!(session.is_ticking());

        session.select(Box::new(Stopwatch::new()));
        assert_eq!(session.kind(), Some(TimerKind::Stopwatch));
        assert!(!session.is_ticking());
        assert_eq!(session.renderer().clears, 2);
        assert_eq!(session.renderer().last(), Some("0s"));
    }

    #[test]
    fn stop_twice_renders_nothing_more() {
        let mut session = Session::new(MemoryRenderer::new());
        session.select(countdown(5));
        session.apply(Command::Start);
        session.tick();
        let shown = session.renderer().lines.len();

        assert_eq!(session.apply(Command::Stop).len(), 1);
        assert!(session.apply(Command::Stop).is_empty());
        assert!(session.tick().is_empty());
        assert_eq!(session.renderer().lines.len(), shown);
    }

    #[test]
    fn second_length_scales_every_period() {
        let mut session =
            Session::new(MemoryRenderer::new()).with_second(Duration::from_millis(10));
        session.select(countdown(1));
        assert_eq!(session.tick_period(), Some(Duration::from_millis(10)));

        session.select(Box::new(crate::timer::SoundLoop::new(3, 1)));
        assert_eq!(session.tick_period(), Some(Duration::from_millis(30)));
    }

    #[test]
    fn huge_periods_saturate() {
        let mut session =
            Session::new(MemoryRenderer::new()).with_second(Duration::from_secs(u64::MAX));
        session.select(Box::new(crate::timer::SoundLoop::new(u64::MAX, 1)));
        assert_eq!(session.tick_period(), Some(Duration::from_nanos(u64::MAX)));
    }
}
