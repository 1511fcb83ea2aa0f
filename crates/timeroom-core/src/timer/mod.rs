mod builder;
mod chess;
mod engine;
mod event_countdown;
mod kind;
mod phase;
mod sound_loop;
mod stopwatch;
mod traits;

pub use builder::{minutes_to_secs, Breathing, TimerConfig, WorkRest, MAX_REPEATS};
pub use chess::ChessClock;
pub use engine::{CountdownEngine, RunState};
pub use event_countdown::EventCountdown;
pub use kind::TimerKind;
pub use phase::{
    format_days_hours, format_minutes_seconds, Phase, PhaseSequence, TimeFormat, TimerPlan,
};
pub use sound_loop::SoundLoop;
pub use stopwatch::Stopwatch;
pub use traits::{Timer, TimerState, DEFAULT_TICK_PERIOD};
