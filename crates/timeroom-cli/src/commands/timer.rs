use std::collections::HashMap;
use std::time::Duration;

use clap::Subcommand;
use timeroom_core::storage::DefaultsConfig;
use timeroom_core::{
    drive, Command, Config, DriveOutcome, Session, TimerKind, TimerRequest, ValidationError,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::render::{OutputFormat, TerminalBell, TerminalRenderer};

/// Values are taken as text and validated by the core, so a bad value gets
/// the same message whatever the front end. Omitted flags fall back to the
/// `defaults` section of the config file.
#[derive(Subcommand, Debug)]
pub enum TimerArgs {
    /// Count down a number of seconds
    Countdown {
        #[arg(long)]
        seconds: Option<String>,
    },
    /// Count up until stopped
    Stopwatch,
    /// Alternate work and rest intervals (seconds)
    Hiit {
        #[arg(long)]
        work: Option<String>,
        #[arg(long)]
        rest: Option<String>,
        #[arg(long)]
        rounds: Option<String>,
    },
    /// Work sessions separated by breaks (minutes)
    Pomodoro {
        #[arg(long)]
        work: Option<String>,
        #[arg(long = "break")]
        brk: Option<String>,
        #[arg(long)]
        rounds: Option<String>,
    },
    /// Tabata intervals (seconds)
    Tabata {
        #[arg(long)]
        work: Option<String>,
        #[arg(long)]
        rest: Option<String>,
        #[arg(long)]
        rounds: Option<String>,
    },
    /// Two-player chess clock; type `s` to switch
    Chess {
        #[arg(long)]
        minutes: Option<String>,
    },
    /// Count down to a date and time
    Event {
        /// e.g. 2026-12-31T23:59 or 2026-12-31T23:59:00Z
        #[arg(long)]
        at: Option<String>,
    },
    /// Run a comma-separated list of intervals
    Custom {
        /// e.g. "30,10,30"
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Speaker countdown (minutes)
    Presentation {
        #[arg(long)]
        minutes: Option<String>,
    },
    /// Guided inhale, hold and exhale cycles
    Breathing {
        #[arg(long)]
        inhale: Option<String>,
        #[arg(long)]
        hold: Option<String>,
        #[arg(long)]
        exhale: Option<String>,
        #[arg(long)]
        cycles: Option<String>,
    },
    /// Repeat a sound cue at a fixed interval
    #[command(name = "soundloop")]
    SoundLoop {
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        repeats: Option<String>,
    },
}

impl TimerArgs {
    pub fn kind(&self) -> TimerKind {
        match self {
            TimerArgs::Countdown { .. } => TimerKind::Countdown,
            TimerArgs::Stopwatch => TimerKind::Stopwatch,
            TimerArgs::Hiit { .. } => TimerKind::Hiit,
            TimerArgs::Pomodoro { .. } => TimerKind::Pomodoro,
            TimerArgs::Tabata { .. } => TimerKind::Tabata,
            TimerArgs::Chess { .. } => TimerKind::Chess,
            TimerArgs::Event { .. } => TimerKind::Event,
            TimerArgs::Custom { .. } => TimerKind::Custom,
            TimerArgs::Presentation { .. } => TimerKind::Presentation,
            TimerArgs::Breathing { .. } => TimerKind::Breathing,
            TimerArgs::SoundLoop { .. } => TimerKind::SoundLoop,
        }
    }

    fn given(&self) -> Vec<(&'static str, Option<&String>)> {
        match self {
            TimerArgs::Countdown { seconds } => vec![("seconds", seconds.as_ref())],
            TimerArgs::Stopwatch => Vec::new(),
            TimerArgs::Hiit { work, rest, rounds } | TimerArgs::Tabata { work, rest, rounds } => {
                vec![
                    ("work", work.as_ref()),
                    ("rest", rest.as_ref()),
                    ("rounds", rounds.as_ref()),
                ]
            }
            TimerArgs::Pomodoro { work, brk, rounds } => vec![
                ("work", work.as_ref()),
                ("break", brk.as_ref()),
                ("rounds", rounds.as_ref()),
            ],
            TimerArgs::Chess { minutes } | TimerArgs::Presentation { minutes } => {
                vec![("minutes", minutes.as_ref())]
            }
            TimerArgs::Event { at } => vec![("at", at.as_ref())],
            TimerArgs::Custom { pattern } => vec![("pattern", pattern.as_ref())],
            TimerArgs::Breathing {
                inhale,
                hold,
                exhale,
                cycles,
            } => vec![
                ("inhale", inhale.as_ref()),
                ("hold", hold.as_ref()),
                ("exhale", exhale.as_ref()),
                ("cycles", cycles.as_ref()),
            ],
            TimerArgs::SoundLoop { interval, repeats } => {
                vec![("interval", interval.as_ref()), ("repeats", repeats.as_ref())]
            }
        }
    }

    /// Overlay the given flags on the configured defaults and validate.
    pub fn request(&self, defaults: &DefaultsConfig) -> Result<TimerRequest, ValidationError> {
        let kind = self.kind();
        let mut fields: HashMap<String, String> = defaults
            .fields(kind)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        for (name, value) in self.given() {
            if let Some(value) = value {
                fields.insert(name.to_string(), value.clone());
            }
        }
        TimerRequest::from_fields(kind, &fields)
    }
}

pub struct RunOptions {
    pub json: bool,
    pub tick_ms: Option<u64>,
}

pub fn run(args: TimerArgs, opts: &RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let request = args.request(&config.defaults)?;
    let timer = request.into_timer(TerminalBell::new(config.output.bell))?;

    let format = if opts.json || config.output.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let second = opts
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_period());

    let mut session =
        Session::new(TerminalRenderer::new(std::io::stdout(), format)).with_second(second);
    session.select(timer);
    session.apply(Command::Start);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(async {
        let (tx, mut rx) = mpsc::channel(16);
        tokio::spawn(read_commands(tx));
        tokio::select! {
            outcome = drive(&mut session, &mut rx) => outcome,
            _ = tokio::signal::ctrl_c() => DriveOutcome::Quit,
        }
    });
    // The stdin reader blocks in a worker thread; don't wait for it.
    runtime.shutdown_background();

    tracing::debug!(?outcome, "timer finished");
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(command) = parse_command(line) else {
            eprintln!("unknown command: {line} (s switch, p pause, c resume, g start, r reset, q quit)");
            continue;
        };
        if tx.send(command).await.is_err() {
            break;
        }
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let command = match line.to_ascii_lowercase().as_str() {
        "s" | "switch" => Command::Switch,
        "p" | "pause" | "stop" => Command::Stop,
        "c" | "continue" | "resume" => Command::Resume,
        "g" | "go" | "start" => Command::Start,
        "r" | "reset" => Command::Reset,
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeroom_core::{TimerConfig, WorkRest};

    #[test]
    fn omitted_flags_use_defaults() {
        let args = TimerArgs::Hiit {
            work: Some("30".into()),
            rest: None,
            rounds: None,
        };
        let request = args.request(&DefaultsConfig::default()).unwrap();
        assert_eq!(
            request,
            TimerRequest::Sequenced(TimerConfig::WorkRest(WorkRest::hiit(30, 10, 8)))
        );
    }

    #[test]
    fn bad_flag_reports_kind_message() {
        let args = TimerArgs::Countdown {
            seconds: Some("ten".into()),
        };
        let err = args.request(&DefaultsConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number of seconds.");
    }

    #[test]
    fn event_without_date_is_rejected() {
        let err = TimerArgs::Event { at: None }
            .request(&DefaultsConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a valid date and time.");
    }

    #[test]
    fn stdin_commands() {
        assert!(matches!(parse_command("s"), Some(Command::Switch)));
        assert!(matches!(parse_command("P"), Some(Command::Stop)));
        assert!(matches!(parse_command("resume"), Some(Command::Resume)));
        assert!(matches!(parse_command("q"), Some(Command::Quit)));
        assert!(parse_command("x").is_none());
    }
}
