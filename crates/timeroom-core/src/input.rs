//! Turning raw form fields into a typed timer request.
//!
//! Fields arrive as text, keyed by name. Each timer kind knows which fields
//! it needs and what to tell the user when one of them is missing or bad.
//!
//! | kind | fields |
//! |------|--------|
//! | countdown | `seconds` |
//! | hiit, tabata | `work`, `rest`, `rounds` (seconds) |
//! | pomodoro | `work`, `break`, `rounds` (minutes) |
//! | chess | `minutes` |
//! | event | `at` |
//! | custom | `pattern` |
//! | presentation | `minutes` |
//! | breathing | `inhale`, `hold`, `exhale`, `cycles` |
//! | soundloop | `interval`, `repeats` |

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::render::AudioCue;
use crate::timer::{
    minutes_to_secs, Breathing, ChessClock, CountdownEngine, EventCountdown, SoundLoop, Stopwatch, Timer,
    TimerConfig, TimerKind, WorkRest,
};

pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for [(&str, &str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> FieldSource for [(&str, &str); N] {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_slice().field(name)
    }
}

/// A validated request for any timer kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum TimerRequest {
    /// Kinds that run through a phase sequence.
    Sequenced(TimerConfig),
    Stopwatch,
    Chess { seconds_per_player: u64 },
    Event { target: DateTime<Utc> },
    SoundLoop { interval_secs: u64, repeats: u32 },
}

impl TimerRequest {
    /// Read and validate the fields `kind` needs.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] carrying the kind's user-facing message
    /// when a field is missing, non-numeric or below its minimum.
    pub fn from_fields(
        kind: TimerKind,
        source: &(impl FieldSource + ?Sized),
    ) -> Result<Self, ValidationError> {
        let num = |name: &str, min: u64| parse_at_least(kind, source, name, min);
        let minutes = |name: &str| minutes_to_secs(kind, name, num(name, 1)?);

        let request = match kind {
            TimerKind::Countdown => TimerRequest::Sequenced(TimerConfig::Countdown {
                seconds: num("seconds", 1)?,
            }),
            TimerKind::Stopwatch => TimerRequest::Stopwatch,
            TimerKind::Hiit | TimerKind::Tabata => {
                let work = num("work", 1)?;
                let rest = num("rest", 1)?;
                let rounds = rounds(kind, num("rounds", 1)?)?;
                let wr = if kind == TimerKind::Hiit {
                    WorkRest::hiit(work, rest, rounds)
                } else {
                    WorkRest::tabata(work, rest, rounds)
                };
                TimerRequest::Sequenced(TimerConfig::WorkRest(wr))
            }
            TimerKind::Pomodoro => {
                let work = num("work", 1)?;
                let brk = num("break", 1)?;
                let rounds = rounds(kind, num("rounds", 1)?)?;
                TimerRequest::Sequenced(TimerConfig::WorkRest(WorkRest::pomodoro(
                    work, brk, rounds,
                )?))
            }
            TimerKind::Chess => TimerRequest::Chess {
                seconds_per_player: minutes("minutes")?,
            },
            TimerKind::Event => {
                let raw = source.field("at").unwrap_or_default();
                TimerRequest::Event {
                    target: parse_datetime(raw)?,
                }
            }
            TimerKind::Custom => TimerRequest::Sequenced(TimerConfig::CustomPattern {
                pattern: parse_pattern(source.field("pattern").unwrap_or_default())?,
            }),
            TimerKind::Presentation => TimerRequest::Sequenced(TimerConfig::Presentation {
                seconds: minutes("minutes")?,
            }),
            TimerKind::Breathing => TimerRequest::Sequenced(TimerConfig::Breathing(Breathing {
                inhale_secs: num("inhale", 1)?,
                hold_secs: num("hold", 0)?,
                exhale_secs: num("exhale", 1)?,
                cycles: rounds(kind, num("cycles", 1)?)?,
            })),
            TimerKind::SoundLoop => TimerRequest::SoundLoop {
                interval_secs: num("interval", 1)?,
                repeats: rounds(kind, num("repeats", 1)?)?,
            },
        };
        Ok(request)
    }

    pub fn kind(&self) -> TimerKind {
        match self {
            TimerRequest::Sequenced(config) => config.kind(),
            TimerRequest::Stopwatch => TimerKind::Stopwatch,
            TimerRequest::Chess { .. } => TimerKind::Chess,
            TimerRequest::Event { .. } => TimerKind::Event,
            TimerRequest::SoundLoop { .. } => TimerKind::SoundLoop,
        }
    }

    /// Build the idle timer this request describes. `cue` is only used by
    /// the sound loop.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a sequenced config builds no
    /// usable phase sequence.
    pub fn into_timer(
        self,
        cue: impl AudioCue + 'static,
    ) -> Result<Box<dyn Timer>, ValidationError> {
        let timer: Box<dyn Timer> = match self {
            TimerRequest::Sequenced(config) => Box::new(CountdownEngine::new(config.build()?)),
            TimerRequest::Stopwatch => Box::new(Stopwatch::new()),
            TimerRequest::Chess { seconds_per_player } => {
                Box::new(ChessClock::new(seconds_per_player))
            }
            TimerRequest::Event { target } => Box::new(EventCountdown::new(target)),
            TimerRequest::SoundLoop {
                interval_secs,
                repeats,
            } => Box::new(SoundLoop::with_cue(interval_secs, repeats, cue)),
        };
        Ok(timer)
    }
}

/// Parse a whole number. Surrounding whitespace is ignored; anything else
/// that is not a digit makes the field invalid.
pub fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn parse_at_least(
    kind: TimerKind,
    source: &(impl FieldSource + ?Sized),
    name: &str,
    min: u64,
) -> Result<u64, ValidationError> {
    source
        .field(name)
        .and_then(parse_count)
        .filter(|value| *value >= min)
        .ok_or_else(|| invalid(kind, name))
}

fn rounds(kind: TimerKind, value: u64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| invalid(kind, "rounds"))
}

fn invalid(kind: TimerKind, field: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: kind.input_error_message().to_string(),
    }
}

/// Parse `"10, 5, 10"` into seconds. Every entry must be a positive integer.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPattern`] naming the first bad entry.
pub fn parse_pattern(raw: &str) -> Result<Vec<u64>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::InvalidPattern {
            entry: String::new(),
        });
    }
    raw.split(',')
        .map(|entry| {
            parse_count(entry)
                .filter(|secs| *secs >= 1)
                .ok_or_else(|| ValidationError::InvalidPattern {
                    entry: entry.trim().to_string(),
                })
        })
        .collect()
}

/// Parse an event date/time.
///
/// Accepts RFC 3339 (`2026-12-31T23:59:00Z`) or a local date/time as a
/// browser's datetime-local field produces it (`2026-12-31T23:59`), with
/// optional seconds and a space instead of the `T`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateTime`] when nothing matches.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidDateTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn countdown_requires_positive_seconds() {
        let ok = TimerRequest::from_fields(TimerKind::Countdown, &[("seconds", " 30 ")]).unwrap();
        assert_eq!(ok, TimerRequest::Sequenced(TimerConfig::Countdown { seconds: 30 }));

        for bad in ["", "0", "-3", "abc", "12abc"] {
            let err = TimerRequest::from_fields(TimerKind::Countdown, &[("seconds", bad)])
                .unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid number of seconds.");
        }
    }

    #[test]
    fn missing_field_uses_kind_message() {
        let err = TimerRequest::from_fields(TimerKind::Pomodoro, &[("work", "25"), ("rounds", "4")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter valid positive numbers for work, break, and rounds."
        );
    }

    #[test]
    fn sound_loop_has_its_own_message() {
        let err = TimerRequest::from_fields(
            TimerKind::SoundLoop,
            &[("interval", "0"), ("repeats", "2")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Enter valid values.");

        let err = TimerRequest::from_fields(
            TimerKind::Tabata,
            &[("work", "20"), ("rest", "x"), ("rounds", "8")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Please enter valid values.");
    }

    #[test]
    fn minutes_that_overflow_are_rejected() {
        let huge = u64::MAX.to_string();
        let err = TimerRequest::from_fields(TimerKind::Chess, &[("minutes", huge.as_str())])
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter minutes for each player.");

        let err = TimerRequest::from_fields(TimerKind::Presentation, &[("minutes", huge.as_str())])
            .unwrap_err();
        assert_eq!(err.to_string(), "Enter total minutes.");

        let err = TimerRequest::from_fields(
            TimerKind::Pomodoro,
            &[("work", huge.as_str()), ("break", "5"), ("rounds", "1")],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter valid positive numbers for work, break, and rounds."
        );
    }

    #[test]
    fn every_default_request_builds_an_idle_timer() {
        let requests = [
            TimerRequest::Sequenced(TimerConfig::Countdown { seconds: 5 }),
            TimerRequest::Stopwatch,
            TimerRequest::Chess {
                seconds_per_player: 60,
            },
            TimerRequest::SoundLoop {
                interval_secs: 2,
                repeats: 3,
            },
        ];
        for request in requests {
            let kind = request.kind();
            let timer = request.into_timer(crate::render::SilentCue).unwrap();
            assert_eq!(timer.kind(), kind);
            assert_eq!(timer.state(), crate::timer::TimerState::Idle);
        }
    }

    #[test]
    fn breathing_hold_may_be_zero() {
        let req = TimerRequest::from_fields(
            TimerKind::Breathing,
            &[("inhale", "4"), ("hold", "0"), ("exhale", "4"), ("cycles", "2")],
        )
        .unwrap();
        assert_eq!(
            req,
            TimerRequest::Sequenced(TimerConfig::Breathing(Breathing {
                inhale_secs: 4,
                hold_secs: 0,
                exhale_secs: 4,
                cycles: 2,
            }))
        );

        let err = TimerRequest::from_fields(
            TimerKind::Breathing,
            &[("inhale", "0"), ("hold", "0"), ("exhale", "4"), ("cycles", "2")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Enter valid numbers.");
    }

    #[test]
    fn minutes_are_converted_to_seconds() {
        let chess = TimerRequest::from_fields(TimerKind::Chess, &[("minutes", "5")]).unwrap();
        assert_eq!(chess, TimerRequest::Chess { seconds_per_player: 300 });

        let pres = TimerRequest::from_fields(TimerKind::Presentation, &[("minutes", "2")]).unwrap();
        assert_eq!(pres, TimerRequest::Sequenced(TimerConfig::Presentation { seconds: 120 }));
    }

    #[test]
    fn pattern_parsing() {
        assert_eq!(parse_pattern("10, 5,10").unwrap(), vec![10, 5, 10]);
        assert!(parse_pattern("").is_err());
        assert!(parse_pattern("10,,5").is_err());
        assert!(parse_pattern("10,x").is_err());
        assert!(parse_pattern("10,0").is_err());
    }

    #[test]
    fn datetime_parsing() {
        let utc = parse_datetime("2026-12-31T23:59:00Z").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap());

        let local = parse_datetime("2026-12-31T23:59").unwrap();
        let expected = Local
            .with_ymd_and_hms(2026, 12, 31, 23, 59, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(local, expected);

        let err = parse_datetime("next tuesday").unwrap_err();
        assert_eq!(err.to_string(), "Please select a valid date and time.");
    }

    #[test]
    fn request_kind_matches_selector() {
        for (kind, fields) in [
            (TimerKind::Tabata, vec![("work", "20"), ("rest", "10"), ("rounds", "8")]),
            (TimerKind::SoundLoop, vec![("interval", "3"), ("repeats", "2")]),
            (TimerKind::Custom, vec![("pattern", "1,2")]),
            (TimerKind::Stopwatch, vec![]),
        ] {
            let req = TimerRequest::from_fields(kind, fields.as_slice()).unwrap();
            assert_eq!(req.kind(), kind);
        }
    }
}
