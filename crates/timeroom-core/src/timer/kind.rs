use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every timer the selector can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Countdown,
    Stopwatch,
    Hiit,
    Pomodoro,
    Chess,
    Event,
    Tabata,
    Custom,
    Presentation,
    Breathing,
    SoundLoop,
}

impl TimerKind {
    pub const ALL: [TimerKind; 11] = [
        TimerKind::Countdown,
        TimerKind::Stopwatch,
        TimerKind::Hiit,
        TimerKind::Pomodoro,
        TimerKind::Chess,
        TimerKind::Event,
        TimerKind::Tabata,
        TimerKind::Custom,
        TimerKind::Presentation,
        TimerKind::Breathing,
        TimerKind::SoundLoop,
    ];

    /// Identifier used by the selector and the CLI.
    pub fn id(self) -> &'static str {
        match self {
            TimerKind::Countdown => "countdown",
            TimerKind::Stopwatch => "stopwatch",
            TimerKind::Hiit => "hiit",
            TimerKind::Pomodoro => "pomodoro",
            TimerKind::Chess => "chess",
            TimerKind::Event => "event",
            TimerKind::Tabata => "tabata",
            TimerKind::Custom => "custom",
            TimerKind::Presentation => "presentation",
            TimerKind::Breathing => "breathing",
            TimerKind::SoundLoop => "soundloop",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TimerKind::Countdown => "Count down a number of seconds",
            TimerKind::Stopwatch => "Count up until paused",
            TimerKind::Hiit => "Work/rest rounds in seconds",
            TimerKind::Pomodoro => "Work/break rounds in minutes",
            TimerKind::Chess => "Two-player chess clock",
            TimerKind::Event => "Count down to a date and time",
            TimerKind::Tabata => "Tabata work/rest rounds",
            TimerKind::Custom => "Custom comma-separated intervals",
            TimerKind::Presentation => "Presentation time budget",
            TimerKind::Breathing => "Inhale/hold/exhale cycles",
            TimerKind::SoundLoop => "Repeating sound cue",
        }
    }

    /// Message shown once the run has finished. `None` for the stopwatch,
    /// which never finishes on its own. The chess clock names the loser
    /// at runtime.
    pub fn completion_message(self) -> Option<&'static str> {
        match self {
            TimerKind::Countdown => Some("Time's up!"),
            TimerKind::Stopwatch | TimerKind::Chess => None,
            TimerKind::Hiit => Some("HIIT complete!"),
            TimerKind::Pomodoro => Some("Pomodoro complete!"),
            TimerKind::Event => Some("Event started!"),
            TimerKind::Tabata => Some("Tabata complete!"),
            TimerKind::Custom => Some("Custom intervals complete!"),
            TimerKind::Presentation => Some("Presentation time is up!"),
            TimerKind::Breathing => Some("Breathing complete!"),
            TimerKind::SoundLoop => Some("Sound loop complete!"),
        }
    }

    /// Message reported to the user when this kind's input does not validate.
    pub fn input_error_message(self) -> &'static str {
        match self {
            TimerKind::Countdown => "Please enter a valid number of seconds.",
            TimerKind::Stopwatch => "",
            TimerKind::Hiit => "Please enter valid positive numbers for work, rest, and rounds.",
            TimerKind::Pomodoro => "Please enter valid positive numbers for work, break, and rounds.",
            TimerKind::Chess => "Please enter minutes for each player.",
            TimerKind::Event => "Please select a valid date and time.",
            TimerKind::Tabata => "Please enter valid values.",
            TimerKind::SoundLoop => "Enter valid values.",
            TimerKind::Custom => "Enter a comma-separated list of seconds.",
            TimerKind::Presentation => "Enter total minutes.",
            TimerKind::Breathing => "Enter valid numbers.",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TimerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TimerKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| format!("unknown timer type: {s}"))
    }
}
