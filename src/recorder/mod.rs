//! Recording lifecycle
//!
//! - [`RecorderController`] drives one recording at a time through
//!   target selection, encoding, and finalization
//! - [`RecorderState`] and [`RecordingJob`] track the in-flight work
//! - [`RecorderEvent`] is the stream presentation layers fold over

pub mod controller;
pub mod state;

pub use controller::{RecorderController, RecorderEvent};
pub use state::{RecorderState, RecordingJob, RecordingOutcome};
