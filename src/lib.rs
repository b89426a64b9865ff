//! snapcap — pick a window or monitor, record it to MP4, save it.
//!
//! This crate is the orchestration core of a minimal screen recorder.
//! The heavy lifting (compositor capture, hardware encoding) lives behind
//! injected ports; what ships here is the recording lifecycle state
//! machine, settings persistence, scratch-file handling, and the event
//! stream a host folds into its widgets.

pub mod capture;
pub mod encoder;
pub mod recorder;
pub mod settings;
pub mod storage;
pub mod ui;
pub mod utils;

pub use capture::{CaptureTarget, CaptureTargetPicker, GraphicsDevice, TargetKind};
pub use encoder::{EncodeError, EncoderConfig, EncoderSession, VideoQuality};
pub use recorder::{RecorderController, RecorderEvent, RecorderState, RecordingOutcome};
pub use settings::{Settings, SettingsStore};
pub use storage::{DestinationPicker, FileLauncher, SaveRequest, TempStore};
pub use utils::error::{ErrorResponse, RecorderError, RecorderResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for a host application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapcap=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
