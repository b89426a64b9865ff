//! Error types and handling
//!
//! Common error types used across the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoder::EncodeError;

/// Recorder-wide error type
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("screen capture is not supported on this device")]
    CaptureUnsupported,

    #[error("recording failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Error response for presentation layers
///
/// Carries the numeric code and message a host shows the user when the
/// encoder collaborator fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u32,
    pub message: String,
}

impl From<&EncodeError> for ErrorResponse {
    fn from(error: &EncodeError) -> Self {
        ErrorResponse {
            code: error.code,
            message: error.message.clone(),
        }
    }
}

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;
