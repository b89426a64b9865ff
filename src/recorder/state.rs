//! Recording state management
//!
//! Defines the recording lifecycle states and the per-job bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::capture::CaptureTarget;
use crate::encoder::EncoderConfig;

/// Current state of the recorder
///
/// `Saved`, `Discarded` and `Failed` are momentary bookkeeping states:
/// the controller passes through them and lands back on `Idle` before
/// the recording call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    /// No recording in progress
    Idle,
    /// Waiting for the user to choose a capture target
    TargetSelection,
    /// Encoder collaborator is consuming frames
    Encoding,
    /// Encode finished, waiting for the save decision
    Finalizing,
    /// Recording moved to its destination
    Saved,
    /// User cancelled the save; scratch file deleted
    Discarded,
    /// Encoder collaborator failed
    Failed,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Bookkeeping for the single in-flight recording
///
/// At most one job exists at a time; a new one can only be created from
/// the `Idle` state.
#[derive(Debug, Clone)]
pub struct RecordingJob {
    /// Job id
    pub id: Uuid,

    /// The chosen capture source, immutable once acquired
    pub target: CaptureTarget,

    /// Encode parameters, dimensions already forced even
    pub config: EncoderConfig,

    /// Scratch file the encoder writes to
    pub temp_path: PathBuf,

    /// When the job was created
    pub started_at: DateTime<Utc>,
}

impl RecordingJob {
    pub fn new(target: CaptureTarget, config: EncoderConfig, temp_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            config,
            temp_path,
            started_at: Utc::now(),
        }
    }
}

/// How a recording attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingOutcome {
    /// Encoded file moved to the user's chosen destination
    Saved { path: PathBuf },
    /// User cancelled the save; the scratch file was deleted
    Discarded,
    /// User backed out of target selection; no job was created
    NoTarget,
}
