//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Tick period
//! - Default inputs per timer kind, used when a field is not given
//! - Output preferences (JSON events, terminal bell)
//!
//! Configuration is stored at `~/.config/timeroom/config.toml`.
//! Timer runs themselves are never persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::TimerKind;

/// Work/rest defaults shared by HIIT, Tabata and Pomodoro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRestDefaults {
    pub work: u64,
    pub rest: u64,
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingDefaults {
    pub inhale: u64,
    pub hold: u64,
    pub exhale: u64,
    pub cycles: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundLoopDefaults {
    pub interval: u64,
    pub repeats: u32,
}

/// Default inputs per timer kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u64,
    /// Seconds.
    #[serde(default = "default_interval_training")]
    pub hiit: WorkRestDefaults,
    /// Seconds.
    #[serde(default = "default_interval_training")]
    pub tabata: WorkRestDefaults,
    /// Minutes.
    #[serde(default = "default_pomodoro")]
    pub pomodoro: WorkRestDefaults,
    #[serde(default = "default_chess_minutes")]
    pub chess_minutes: u64,
    #[serde(default = "default_presentation_minutes")]
    pub presentation_minutes: u64,
    #[serde(default = "default_custom_pattern")]
    pub custom_pattern: String,
    #[serde(default = "default_breathing")]
    pub breathing: BreathingDefaults,
    #[serde(default = "default_sound_loop")]
    pub soundloop: SoundLoopDefaults,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print every event as a JSON line instead of plain text.
    #[serde(default)]
    pub json: bool,
    /// Ring the terminal bell for the sound loop.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeroom/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// Default functions
fn default_tick_period_ms() -> u64 {
    1000
}
fn default_countdown_seconds() -> u64 {
    60
}
fn default_interval_training() -> WorkRestDefaults {
    WorkRestDefaults {
        work: 20,
        rest: 10,
        rounds: 8,
    }
}
fn default_pomodoro() -> WorkRestDefaults {
    WorkRestDefaults {
        work: 25,
        rest: 5,
        rounds: 4,
    }
}
fn default_chess_minutes() -> u64 {
    5
}
fn default_presentation_minutes() -> u64 {
    10
}
fn default_custom_pattern() -> String {
    "30,10,30".into()
}
fn default_breathing() -> BreathingDefaults {
    BreathingDefaults {
        inhale: 4,
        hold: 4,
        exhale: 4,
        cycles: 4,
    }
}
fn default_sound_loop() -> SoundLoopDefaults {
    SoundLoopDefaults {
        interval: 60,
        repeats: 5,
    }
}
fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: default_countdown_seconds(),
            hiit: default_interval_training(),
            tabata: default_interval_training(),
            pomodoro: default_pomodoro(),
            chess_minutes: default_chess_minutes(),
            presentation_minutes: default_presentation_minutes(),
            custom_pattern: default_custom_pattern(),
            breathing: default_breathing(),
            soundloop: default_sound_loop(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            bell: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_period_ms: default_tick_period_ms(),
            defaults: DefaultsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DefaultsConfig {
    /// Default form fields for `kind`, keyed the way the input layer reads them.
    pub fn fields(&self, kind: TimerKind) -> Vec<(&'static str, String)> {
        let work_rest = |d: &WorkRestDefaults, rest_key: &'static str| {
            vec![
                ("work", d.work.to_string()),
                (rest_key, d.rest.to_string()),
                ("rounds", d.rounds.to_string()),
            ]
        };
        match kind {
            TimerKind::Countdown => vec![("seconds", self.countdown_seconds.to_string())],
            TimerKind::Stopwatch | TimerKind::Event => Vec::new(),
            TimerKind::Hiit => work_rest(&self.hiit, "rest"),
            TimerKind::Tabata => work_rest(&self.tabata, "rest"),
            TimerKind::Pomodoro => work_rest(&self.pomodoro, "break"),
            TimerKind::Chess => vec![("minutes", self.chess_minutes.to_string())],
            TimerKind::Presentation => vec![("minutes", self.presentation_minutes.to_string())],
            TimerKind::Custom => vec![("pattern", self.custom_pattern.clone())],
            TimerKind::Breathing => vec![
                ("inhale", self.breathing.inhale.to_string()),
                ("hold", self.breathing.hold.to_string()),
                ("exhale", self.breathing.exhale.to_string()),
                ("cycles", self.breathing.cycles.to_string()),
            ],
            TimerKind::SoundLoop => vec![
                ("interval", self.soundloop.interval.to_string()),
                ("repeats", self.soundloop.repeats.to_string()),
            ],
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults first if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_period_ms.max(1))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default configuration");
            Self::default()
        })
    }
}
