//! Terminal output for a running timer.

use std::io::{self, Write};

use timeroom_core::{AudioCue, AudioError, Event, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One serialized [`Event`] per line, command acknowledgements included.
    Json,
}

/// Writes one line per display change.
pub struct TerminalRenderer<W> {
    out: W,
    format: OutputFormat,
    last: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            last: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::debug!(%err, "could not write to terminal");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn show(&mut self, text: &str) {
        // The display of a freshly selected timer and its first tick match.
        if self.last.as_deref() == Some(text) {
            return;
        }
        self.line(text);
        self.last = Some(text.to_string());
    }

    fn complete(&mut self, message: &str) {
        self.line(message);
        self.last = None;
    }

    fn clear(&mut self) {
        self.last = None;
    }

    fn event(&mut self, event: &Event) {
        match self.format {
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(json) => self.line(&json),
                Err(err) => tracing::warn!(%err, "could not encode event"),
            },
            OutputFormat::Text => match event {
                Event::Snapshot { display, .. } => self.show(display),
                Event::TimerCompleted { message, .. } => self.complete(message),
                _ => {}
            },
        }
    }
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioCue for TerminalBell {
    fn play(&mut self) -> Result<(), AudioError> {
        if !self.enabled {
            return Ok(());
        }
        let mut err = io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}
