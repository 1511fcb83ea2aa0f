use serde::{Deserialize, Serialize};

use super::kind::TimerKind;
use crate::error::ValidationError;

/// One named span of counted time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Display prefix, e.g. "Round 2 - Rest". Empty renders the bare time.
    pub label: String,
    pub duration_secs: u64,
}

impl Phase {
    pub fn new(label: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            label: label.into(),
            duration_secs,
        }
    }
}

/// How remaining seconds are written into a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `"7s"`
    #[default]
    Seconds,
    /// `"4m 50s"`
    MinutesSeconds,
}

impl TimeFormat {
    pub fn format(self, secs: u64) -> String {
        match self {
            TimeFormat::Seconds => format!("{secs}s"),
            TimeFormat::MinutesSeconds => format_minutes_seconds(secs),
        }
    }
}

pub fn format_minutes_seconds(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Split into days/hours/minutes/seconds by successive integer division.
pub fn format_days_hours(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s left")
}

/// Ordered, non-empty plan of phases for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct PhaseSequence {
    phases: Vec<Phase>,
}

impl PhaseSequence {
    /// Validate and wrap a list of phases.
    ///
    /// # Errors
    ///
    /// Fails when the list is empty, when no phase lasts at least one
    /// second, or when the total tick count does not fit in a `u64`.
    pub fn new(phases: Vec<Phase>) -> Result<Self, ValidationError> {
        if phases.is_empty() {
            return Err(ValidationError::EmptySequence);
        }
        if phases.iter().all(|p| p.duration_secs == 0) {
            return Err(ValidationError::ZeroLengthSequence);
        }
        if checked_total_ticks(&phases).is_none() {
            return Err(ValidationError::DurationOverflow);
        }
        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn first(&self) -> &Phase {
        // Non-empty by construction.
        &self.phases[0]
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.phases.len()
    }

    /// Never exceeds [`total_ticks`](Self::total_ticks), which fits by
    /// construction.
    pub fn total_secs(&self) -> u64 {
        self.phases
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.duration_secs))
    }

    /// Ticks from start to completion: every phase is shown at its
    /// duration, duration-1, ..., 0.
    pub fn total_ticks(&self) -> u64 {
        checked_total_ticks(&self.phases).unwrap_or(u64::MAX)
    }
}

fn checked_total_ticks(phases: &[Phase]) -> Option<u64> {
    phases.iter().try_fold(0u64, |acc, p| {
        p.duration_secs.checked_add(1).and_then(|ticks| acc.checked_add(ticks))
    })
}

impl TryFrom<Vec<Phase>> for PhaseSequence {
    type Error = ValidationError;

    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<PhaseSequence> for Vec<Phase> {
    fn from(sequence: PhaseSequence) -> Self {
        sequence.phases
    }
}

/// A validated sequence plus everything needed to render a run of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerPlan {
    pub kind: TimerKind,
    pub sequence: PhaseSequence,
    pub completion_message: String,
    #[serde(default)]
    pub format: TimeFormat,
}

impl TimerPlan {
    /// Render the display string for `remaining` seconds of phase `index`.
    pub fn display(&self, index: usize, remaining: u64) -> String {
        let time = self.format.format(remaining);
        match self.sequence.get(index) {
            Some(phase) if !phase.label.is_empty() => format!("{}: {time}", phase.label),
            _ => time,
        }
    }
}
