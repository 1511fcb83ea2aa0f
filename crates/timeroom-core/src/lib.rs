//! # Timeroom Core Library
//!
//! Core logic for the Timeroom family of timers: countdown, stopwatch,
//! HIIT, Pomodoro, Tabata, chess clock, event countdown, custom intervals,
//! presentation, breathing and a repeating sound cue.
//!
//! ## Architecture
//!
//! - **Phase model**: most timers are a [`PhaseSequence`] - an ordered list of
//!   labelled spans - built from a [`TimerConfig`] by one builder
//! - **Engines**: tick-driven state machines implementing [`Timer`]; the
//!   caller invokes `tick()` once per period and renders what comes back
//! - **Session / scheduler**: one [`Session`] owns the single live timer and
//!   [`scheduler::drive`] feeds it ticks and commands on one task
//! - **Storage**: TOML-based configuration of defaults and output
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: phase-sequenced countdown
//! - [`TimerRequest`]: validated input for any timer kind
//! - [`Renderer`]: where display strings go
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AudioError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use input::{FieldSource, TimerRequest};
pub use render::{AudioCue, MemoryRenderer, Renderer, SilentCue};
pub use scheduler::{drive, DriveOutcome, TickScheduler};
pub use session::{Command, Session};
pub use storage::Config;
pub use timer::{
    Breathing, ChessClock, CountdownEngine, EventCountdown, Phase, PhaseSequence, RunState,
    SoundLoop, Stopwatch, TimeFormat, Timer, TimerConfig, TimerKind, TimerPlan, TimerState,
    WorkRest,
};
