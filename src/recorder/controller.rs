//! Recording controller
//!
//! Drives the recording lifecycle: target selection, encoding into a
//! scratch file, and finalization to the user's chosen destination.
//! All user-facing collaborators are injected ports; presentation state
//! is derived from the event stream, never mutated here.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::state::{RecorderState, RecordingJob, RecordingOutcome};
use crate::capture::{CaptureTargetPicker, GraphicsDevice};
use crate::encoder::{EncoderConfig, EncoderSession};
use crate::settings::Settings;
use crate::storage::{self, DestinationPicker, FileLauncher, SaveRequest, TempStore};
use crate::utils::error::{ErrorResponse, RecorderError, RecorderResult};

/// Events emitted while a recording runs
///
/// Hosts fold these into their widgets; see [`crate::ui::Affordances`].
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// Target picker is on screen
    TargetSelection,
    /// User backed out of the picker; no job was created
    SelectionCancelled,
    /// Encoding started
    Started,
    /// Graceful stop requested, encode finished, awaiting save decision
    Finalizing,
    /// Recording saved to its destination
    Saved { path: PathBuf },
    /// User cancelled the save; recording thrown out
    Discarded,
    /// Encoder collaborator failed
    Failed(ErrorResponse),
}

/// Owns the recording lifecycle state machine
///
/// At most one recording is in flight; arming while not idle fails with
/// [`RecorderError::AlreadyRecording`].
pub struct RecorderController {
    device: GraphicsDevice,
    temp: TempStore,

    picker: Arc<dyn CaptureTargetPicker>,
    encoder: Arc<dyn EncoderSession>,
    destination: Arc<dyn DestinationPicker>,
    launcher: Arc<dyn FileLauncher>,

    state: RwLock<RecorderState>,
    job: RwLock<Option<RecordingJob>>,
    cancel: Arc<AtomicBool>,
    event_tx: broadcast::Sender<RecorderEvent>,
}

impl RecorderController {
    pub fn new(
        device: GraphicsDevice,
        temp: TempStore,
        picker: Arc<dyn CaptureTargetPicker>,
        encoder: Arc<dyn EncoderSession>,
        destination: Arc<dyn DestinationPicker>,
        launcher: Arc<dyn FileLauncher>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            device,
            temp,
            picker,
            encoder,
            destination,
            launcher,
            state: RwLock::new(RecorderState::Idle),
            job: RwLock::new(None),
            cancel: Arc::new(AtomicBool::new(false)),
            event_tx,
        }
    }

    /// Get the current recorder state
    pub fn state(&self) -> RecorderState {
        *self.state.read()
    }

    /// Get a snapshot of the in-flight job, if any
    pub fn current_job(&self) -> Option<RecordingJob> {
        self.job.read().clone()
    }

    /// Subscribe to recorder events
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: RecorderEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Run one recording from arming to its terminal state
    ///
    /// Suspends for as long as the user records. Picker cancellations
    /// resolve to [`RecordingOutcome::NoTarget`] / `Discarded`; only
    /// collaborator failures and filesystem errors are `Err`.
    pub async fn record(&self, settings: &Settings) -> RecorderResult<RecordingOutcome> {
        if !self.picker.is_supported() {
            return Err(RecorderError::CaptureUnsupported);
        }

        {
            let mut state = self.state.write();
            if *state != RecorderState::Idle {
                return Err(RecorderError::AlreadyRecording);
            }
            *state = RecorderState::TargetSelection;
        }
        self.emit(RecorderEvent::TargetSelection);

        let result = self.drive(settings).await;

        // Momentary terminal state, then straight back to Idle.
        *self.state.write() = match &result {
            Ok(RecordingOutcome::Saved { .. }) => RecorderState::Saved,
            Ok(RecordingOutcome::Discarded) => RecorderState::Discarded,
            Ok(RecordingOutcome::NoTarget) => RecorderState::Idle,
            Err(_) => RecorderState::Failed,
        };
        *self.job.write() = None;
        *self.state.write() = RecorderState::Idle;

        result
    }

    /// Request a graceful stop of the running encode
    ///
    /// Only valid while encoding; there is no cancellation once the save
    /// decision is pending.
    pub fn stop(&self) -> RecorderResult<()> {
        if *self.state.read() != RecorderState::Encoding {
            return Err(RecorderError::NotRecording);
        }
        tracing::info!("Stop requested");
        self.cancel.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn drive(&self, settings: &Settings) -> RecorderResult<RecordingOutcome> {
        let mut config = EncoderConfig::for_quality(settings.quality, settings.frame_rate);

        let target = match self.picker.pick().await {
            Some(target) => target,
            None => {
                tracing::debug!("Target selection cancelled");
                self.emit(RecorderEvent::SelectionCancelled);
                return Ok(RecordingOutcome::NoTarget);
            }
        };

        if settings.use_source_size {
            config = config.with_source_size(target.width, target.height);
        }

        let temp_path = self.temp.create_output()?;
        *self.job.write() = Some(RecordingJob::new(target.clone(), config, temp_path.clone()));

        self.cancel.store(false, Ordering::Relaxed);
        *self.state.write() = RecorderState::Encoding;
        self.emit(RecorderEvent::Started);
        tracing::info!(
            "Recording '{}' at {}x{} @ {}fps, {} bps",
            target.name,
            config.width,
            config.height,
            config.frame_rate,
            config.bitrate
        );

        let encoded = self
            .encoder
            .encode(
                &self.device,
                &target,
                config,
                &temp_path,
                Arc::clone(&self.cancel),
            )
            .await;

        if let Err(e) = encoded {
            tracing::error!("Encoder reported failure: {}", e);
            tracing::warn!("Keeping partial recording at {:?}", temp_path);
            self.emit(RecorderEvent::Failed(ErrorResponse::from(&e)));
            return Err(e.into());
        }

        *self.state.write() = RecorderState::Finalizing;
        self.emit(RecorderEvent::Finalizing);
        tracing::info!("Encode finished, awaiting save decision");

        match self
            .destination
            .pick_save_location(&SaveRequest::default())
            .await
        {
            None => {
                storage::discard(&temp_path)?;
                tracing::info!("Save cancelled, recording discarded");
                self.emit(RecorderEvent::Discarded);
                Ok(RecordingOutcome::Discarded)
            }
            Some(destination) => {
                storage::persist(&temp_path, &destination)?;
                tracing::info!("Recording saved to {:?}", destination);
                self.emit(RecorderEvent::Saved {
                    path: destination.clone(),
                });
                if let Err(e) = self.launcher.launch(&destination).await {
                    tracing::warn!("Failed to open {:?}: {}", destination, e);
                }
                Ok(RecordingOutcome::Saved { path: destination })
            }
        }
    }
}
