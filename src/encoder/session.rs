//! Encoder session port
//!
//! Seam to the external capture/encode collaborator. The collaborator
//! pulls frames from the compositor for a chosen target, feeds them to a
//! hardware encoder, and writes an MP4 container to the output path
//! until told to stop or until it fails.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use thiserror::Error;

use crate::capture::{CaptureTarget, GraphicsDevice};
use crate::encoder::config::EncoderConfig;

/// Failure surfaced by the encoder collaborator
///
/// Carries whatever numeric code and message the collaborator supplied;
/// nothing is retried on our side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("0x{code:08X} - {message}")]
pub struct EncodeError {
    pub code: u32,
    pub message: String,
}

impl EncodeError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Port to the external encoder collaborator
#[async_trait]
pub trait EncoderSession: Send + Sync {
    /// Encode the target to `output` until cancelled or failed
    ///
    /// Runs until the `cancel` flag is raised (graceful stop: the
    /// container is finalized and `Ok` returned) or the collaborator
    /// fails internally. The output file already exists and is exclusively
    /// owned by the current job.
    async fn encode(
        &self,
        device: &GraphicsDevice,
        target: &CaptureTarget,
        config: EncoderConfig,
        output: &Path,
        cancel: Arc<AtomicBool>,
    ) -> Result<(), EncodeError>;
}
