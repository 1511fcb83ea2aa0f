//! Output boundaries: the display surface and the audio cue.
//!
//! Only final strings cross the renderer boundary; all formatting happens in
//! the timers.

use crate::error::AudioError;
use crate::events::Event;

pub trait Renderer {
    /// Show a progress snapshot, replacing whatever was shown before.
    fn show(&mut self, text: &str);

    /// Show the terminal message of a run.
    fn complete(&mut self, message: &str);

    /// Blank the display when the selected timer changes.
    fn clear(&mut self) {}

    /// Route an event to `show`/`complete`. Command acknowledgements are
    /// not displayed by default.
    fn event(&mut self, event: &Event) {
        match event {
            Event::Snapshot { display, .. } => self.show(display),
            Event::TimerCompleted { message, .. } => self.complete(message),
            _ => {}
        }
    }
}

/// Records every line shown. Useful for tests and for hosts that poll.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    pub lines: Vec<String>,
    pub clears: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl Renderer for MemoryRenderer {
    fn show(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn complete(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn show(&mut self, text: &str) {
        (**self).show(text);
    }

    fn complete(&mut self, message: &str) {
        (**self).complete(message);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn event(&mut self, event: &Event) {
        (**self).event(event);
    }
}

/// Fire-and-forget sound played by the sound loop.
pub trait AudioCue: Send {
    /// # Errors
    ///
    /// Returns [`AudioError`] if the cue could not be played. Callers log it
    /// and keep counting.
    fn play(&mut self) -> Result<(), AudioError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}
