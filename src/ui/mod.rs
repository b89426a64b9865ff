//! Presentation fold
//!
//! The controller never touches widgets; hosts fold [`RecorderEvent`]s
//! into an [`Affordances`] snapshot and render that however they like.

use crate::recorder::RecorderEvent;

/// Record-button icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Ready to record
    Record,
    /// Recording in progress
    Recording,
}

impl Glyph {
    /// Segoe MDL2 Assets codepoint for this icon
    pub fn codepoint(&self) -> char {
        match self {
            Glyph::Record => '\u{E722}',
            Glyph::Recording => '\u{E15B}',
        }
    }
}

/// Widget state derived from recorder events
///
/// `armed` mirrors the record toggle, `busy` the indeterminate progress
/// indicator shown between stop request and save decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub armed: bool,
    pub glyph: Glyph,
    pub busy: bool,
}

impl Default for Affordances {
    fn default() -> Self {
        Self {
            armed: false,
            glyph: Glyph::Record,
            busy: false,
        }
    }
}

impl Affordances {
    /// Fold one event into the widget state
    pub fn apply(&mut self, event: &RecorderEvent) {
        match event {
            RecorderEvent::TargetSelection => self.armed = true,
            RecorderEvent::SelectionCancelled => self.armed = false,
            RecorderEvent::Started => self.glyph = Glyph::Recording,
            RecorderEvent::Finalizing => self.busy = true,
            RecorderEvent::Saved { .. } | RecorderEvent::Discarded => {
                self.armed = false;
                self.glyph = Glyph::Record;
                self.busy = false;
            }
            // Failure resets the toggle and progress indicator only; the
            // icon keeps its last state.
            RecorderEvent::Failed(_) => {
                self.armed = false;
                self.busy = false;
            }
        }
    }
}
