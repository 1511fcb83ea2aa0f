//! Phase sequence builder.
//!
//! Turns a validated timer configuration into a [`TimerPlan`] without side
//! effects. Every numeric input is checked against its minimum (1 for
//! durations, rounds and cycles; 0 for the breathing hold) and against
//! [`MAX_REPEATS`], and the total run length must fit in a `u64` tick count,
//! so a plan that comes out of here can always be run.

use serde::{Deserialize, Serialize};

use super::kind::TimerKind;
use super::phase::{Phase, PhaseSequence, TimeFormat, TimerPlan};
use crate::error::ValidationError;

/// Upper bound on rounds, cycles and custom pattern entries. Every repeat
/// materialises its phases up front.
pub const MAX_REPEATS: u32 = 10_000;

/// Alternating work/rest rounds (HIIT, Tabata, Pomodoro).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRest {
    pub kind: TimerKind,
    pub work_secs: u64,
    pub rest_secs: u64,
    pub rounds: u32,
    pub work_label: String,
    pub rest_label: String,
    pub completion_message: String,
    #[serde(default)]
    pub format: TimeFormat,
}

impl WorkRest {
    pub fn hiit(work_secs: u64, rest_secs: u64, rounds: u32) -> Self {
        Self::seconds(TimerKind::Hiit, work_secs, rest_secs, rounds)
    }

    pub fn tabata(work_secs: u64, rest_secs: u64, rounds: u32) -> Self {
        Self::seconds(TimerKind::Tabata, work_secs, rest_secs, rounds)
    }

    /// Pomodoro rounds are configured in minutes and shown as `"Xm Ys"`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidField`] when a minute count does
    /// not fit in seconds.
    pub fn pomodoro(
        work_min: u64,
        break_min: u64,
        rounds: u32,
    ) -> Result<Self, ValidationError> {
        let kind = TimerKind::Pomodoro;
        Ok(Self {
            kind,
            work_secs: minutes_to_secs(kind, "work", work_min)?,
            rest_secs: minutes_to_secs(kind, "break", break_min)?,
            rounds,
            work_label: "Work".into(),
            rest_label: "Break".into(),
            completion_message: completion_for(kind),
            format: TimeFormat::MinutesSeconds,
        })
    }

    fn seconds(kind: TimerKind, work_secs: u64, rest_secs: u64, rounds: u32) -> Self {
        Self {
            kind,
            work_secs,
            rest_secs,
            rounds,
            work_label: "Work".into(),
            rest_label: "Rest".into(),
            completion_message: completion_for(kind),
            format: TimeFormat::Seconds,
        }
    }
}

/// Inhale, optional hold, exhale, repeated for a number of cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breathing {
    pub inhale_secs: u64,
    /// Zero omits the hold phase entirely.
    pub hold_secs: u64,
    pub exhale_secs: u64,
    pub cycles: u32,
}

/// Configuration for every timer that runs through a phase sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerConfig {
    Countdown { seconds: u64 },
    WorkRest(WorkRest),
    CustomPattern { pattern: Vec<u64> },
    Presentation { seconds: u64 },
    Breathing(Breathing),
}

impl TimerConfig {
    pub fn kind(&self) -> TimerKind {
        match self {
            TimerConfig::Countdown { .. } => TimerKind::Countdown,
            TimerConfig::WorkRest(wr) => wr.kind,
            TimerConfig::CustomPattern { .. } => TimerKind::Custom,
            TimerConfig::Presentation { .. } => TimerKind::Presentation,
            TimerConfig::Breathing(_) => TimerKind::Breathing,
        }
    }

    /// Expand into a runnable plan.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when any input is below its minimum or a
    /// custom pattern is empty. Nothing is started in that case.
    pub fn build(&self) -> Result<TimerPlan, ValidationError> {
        let kind = self.kind();
        let (phases, completion_message, format) = match self {
            TimerConfig::Countdown { seconds } => {
                at_least(kind, "seconds", *seconds, 1)?;
                (
                    vec![Phase::new("", *seconds)],
                    completion_for(kind),
                    TimeFormat::Seconds,
                )
            }
            TimerConfig::WorkRest(wr) => {
                at_least(kind, "work", wr.work_secs, 1)?;
                at_least(kind, "rest", wr.rest_secs, 1)?;
                within(kind, "rounds", wr.rounds)?;
                let phases = (1..=wr.rounds)
                    .flat_map(|round| {
                        [
                            Phase::new(format!("Round {round} - {}", wr.work_label), wr.work_secs),
                            Phase::new(format!("Round {round} - {}", wr.rest_label), wr.rest_secs),
                        ]
                    })
                    .collect();
                (phases, wr.completion_message.clone(), wr.format)
            }
            TimerConfig::CustomPattern { pattern } => {
                if pattern.is_empty() {
                    return Err(ValidationError::InvalidPattern {
                        entry: String::new(),
                    });
                }
                if pattern.len() > MAX_REPEATS as usize {
                    return Err(invalid(kind, "pattern"));
                }
                if let Some(bad) = pattern.iter().find(|secs| **secs < 1) {
                    return Err(ValidationError::InvalidPattern {
                        entry: bad.to_string(),
                    });
                }
                let phases = pattern
                    .iter()
                    .enumerate()
                    .map(|(i, secs)| Phase::new(format!("Interval {}", i + 1), *secs))
                    .collect();
                (phases, completion_for(kind), TimeFormat::Seconds)
            }
            TimerConfig::Presentation { seconds } => {
                at_least(kind, "minutes", *seconds, 1)?;
                (
                    vec![Phase::new("Time left", *seconds)],
                    completion_for(kind),
                    TimeFormat::MinutesSeconds,
                )
            }
            TimerConfig::Breathing(b) => {
                at_least(kind, "inhale", b.inhale_secs, 1)?;
                at_least(kind, "exhale", b.exhale_secs, 1)?;
                within(kind, "cycles", b.cycles)?;
                let mut phases = Vec::new();
                for _ in 0..b.cycles {
                    phases.push(Phase::new("Inhale", b.inhale_secs));
                    if b.hold_secs > 0 {
                        phases.push(Phase::new("Hold", b.hold_secs));
                    }
                    phases.push(Phase::new("Exhale", b.exhale_secs));
                }
                (phases, completion_for(kind), TimeFormat::Seconds)
            }
        };

        let sequence = PhaseSequence::new(phases).map_err(|err| match err {
            ValidationError::DurationOverflow => invalid(kind, "duration"),
            other => other,
        })?;
        Ok(TimerPlan {
            kind,
            sequence,
            completion_message,
            format,
        })
    }
}

fn completion_for(kind: TimerKind) -> String {
    kind.completion_message().unwrap_or_default().to_string()
}

/// Convert a minute count to seconds, rejecting values that overflow.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidField`] carrying `kind`'s message.
pub fn minutes_to_secs(
    kind: TimerKind,
    field: &str,
    minutes: u64,
) -> Result<u64, ValidationError> {
    minutes.checked_mul(60).ok_or_else(|| invalid(kind, field))
}

fn invalid(kind: TimerKind, field: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: kind.input_error_message().to_string(),
    }
}

fn at_least(kind: TimerKind, field: &str, value: u64, min: u64) -> Result<(), ValidationError> {
    if value < min {
        return Err(invalid(kind, field));
    }
    Ok(())
}

/// Between 1 and [`MAX_REPEATS`].
fn within(kind: TimerKind, field: &str, count: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_REPEATS).contains(&count) {
        return Err(invalid(kind, field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(plan: &TimerPlan) -> Vec<(&str, u64)> {
        plan.sequence
            .phases()
            .iter()
            .map(|p| (p.label.as_str(), p.duration_secs))
            .collect()
    }

    #[test]
    fn work_rest_expands_rounds() {
        let plan = TimerConfig::WorkRest(WorkRest::hiit(2, 1, 2)).build().unwrap();
        assert_eq!(
            labels(&plan),
            vec![
                ("Round 1 - Work", 2),
                ("Round 1 - Rest", 1),
                ("Round 2 - Work", 2),
                ("Round 2 - Rest", 1),
            ]
        );
        assert_eq!(plan.completion_message, "HIIT complete!");
    }

    #[test]
    fn pomodoro_uses_minutes_and_break_label() {
        let plan = TimerConfig::WorkRest(WorkRest::pomodoro(25, 5, 1).unwrap()).build().unwrap();
        assert_eq!(labels(&plan), vec![("Round 1 - Work", 1500), ("Round 1 - Break", 300)]);
        assert_eq!(plan.format, TimeFormat::MinutesSeconds);
        assert_eq!(plan.display(0, 1500), "Round 1 - Work: 25m 0s");
    }

    #[test]
    fn breathing_omits_zero_hold() {
        let plan = TimerConfig::Breathing(Breathing {
            inhale_secs: 4,
            hold_secs: 0,
            exhale_secs: 4,
            cycles: 1,
        })
        .build()
        .unwrap();
        assert_eq!(labels(&plan), vec![("Inhale", 4), ("Exhale", 4)]);
    }

    #[test]
    fn breathing_keeps_hold_when_set() {
        let plan = TimerConfig::Breathing(Breathing {
            inhale_secs: 4,
            hold_secs: 7,
            exhale_secs: 8,
            cycles: 2,
        })
        .build()
        .unwrap();
        assert_eq!(plan.sequence.len(), 6);
        assert_eq!(plan.sequence.get(1).unwrap().label, "Hold");
    }

    #[test]
    fn custom_pattern_labels_are_one_based() {
        let plan = TimerConfig::CustomPattern { pattern: vec![10, 5, 10] }.build().unwrap();
        assert_eq!(
            labels(&plan),
            vec![("Interval 1", 10), ("Interval 2", 5), ("Interval 3", 10)]
        );
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = TimerConfig::CustomPattern { pattern: vec![] }.build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPattern { .. }));
    }

    #[test]
    fn below_minimum_reports_kind_message() {
        let err = TimerConfig::WorkRest(WorkRest::tabata(20, 0, 8)).build().unwrap_err();
        assert_eq!(err.to_string(), "Please enter valid values.");

        let err = TimerConfig::Countdown { seconds: 0 }.build().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number of seconds.");
    }

    #[test]
    fn overflowing_durations_are_rejected() {
        let err = TimerConfig::Countdown { seconds: u64::MAX }.build().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number of seconds.");

        let err = TimerConfig::WorkRest(WorkRest::hiit(u64::MAX / 2, u64::MAX / 2, 2))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));

        let err = WorkRest::pomodoro(u64::MAX, 1, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter valid positive numbers for work, break, and rounds."
        );

        let plan = TimerConfig::Countdown { seconds: u64::MAX - 1 }.build().unwrap();
        assert_eq!(plan.sequence.total_secs(), u64::MAX - 1);
        assert_eq!(plan.sequence.total_ticks(), u64::MAX);
    }

    #[test]
    fn repeats_are_bounded() {
        let err = TimerConfig::WorkRest(WorkRest::tabata(1, 1, MAX_REPEATS + 1))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter valid values.");
        assert!(TimerConfig::WorkRest(WorkRest::tabata(1, 1, MAX_REPEATS)).build().is_ok());

        let err = TimerConfig::Breathing(Breathing {
            inhale_secs: 1,
            hold_secs: 0,
            exhale_secs: 1,
            cycles: u32::MAX,
        })
        .build()
        .unwrap_err();
        assert_eq!(err.to_string(), "Enter valid numbers.");

        let pattern = vec![1; MAX_REPEATS as usize + 1];
        let err = TimerConfig::CustomPattern { pattern }.build().unwrap_err();
        assert_eq!(err.to_string(), "Enter a comma-separated list of seconds.");
    }

    #[test]
    fn presentation_shows_time_left() {
        let plan = TimerConfig::Presentation { seconds: 600 }.build().unwrap();
        assert_eq!(plan.display(0, 599), "Time left: 9m 59s");
        assert_eq!(plan.completion_message, "Presentation time is up!");
    }
}
