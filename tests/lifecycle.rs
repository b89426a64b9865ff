//! End-to-end recording lifecycle tests
//!
//! Drives the controller headlessly through every terminal state using
//! stub ports in place of the compositor picker, the hardware encoder,
//! and the save dialog.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use snapcap::{
    CaptureTarget, CaptureTargetPicker, DestinationPicker, EncodeError, EncoderConfig,
    EncoderSession, FileLauncher, GraphicsDevice, RecorderController, RecorderError,
    RecorderEvent, RecorderState, RecordingOutcome, SaveRequest, Settings, TempStore,
    VideoQuality,
};

struct StubPicker {
    target: Option<CaptureTarget>,
    supported: bool,
}

impl StubPicker {
    fn choosing(target: CaptureTarget) -> Self {
        Self {
            target: Some(target),
            supported: true,
        }
    }

    fn cancelling() -> Self {
        Self {
            target: None,
            supported: true,
        }
    }
}

#[async_trait]
impl CaptureTargetPicker for StubPicker {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn pick(&self) -> Option<CaptureTarget> {
        self.target.clone()
    }
}

/// Encoder that finishes immediately, recording the config it was given
struct InstantEncoder {
    payload: &'static [u8],
    seen: Mutex<Vec<EncoderConfig>>,
}

impl InstantEncoder {
    fn new(payload: &'static [u8]) -> Self {
        Self {
            payload,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EncoderSession for InstantEncoder {
    async fn encode(
        &self,
        _device: &GraphicsDevice,
        _target: &CaptureTarget,
        config: EncoderConfig,
        output: &Path,
        _cancel: Arc<AtomicBool>,
    ) -> Result<(), EncodeError> {
        self.seen.lock().push(config);
        std::fs::write(output, self.payload).map_err(|e| EncodeError::new(1, e.to_string()))?;
        Ok(())
    }
}

/// Encoder that runs until the cancel flag is raised, then finalizes
struct RunUntilStoppedEncoder {
    payload: &'static [u8],
}

#[async_trait]
impl EncoderSession for RunUntilStoppedEncoder {
    async fn encode(
        &self,
        _device: &GraphicsDevice,
        _target: &CaptureTarget,
        _config: EncoderConfig,
        output: &Path,
        cancel: Arc<AtomicBool>,
    ) -> Result<(), EncodeError> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while !cancel.load(Ordering::Relaxed) {
            if tokio::time::Instant::now() > deadline {
                return Err(EncodeError::new(2, "no stop signal received"));
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        std::fs::write(output, self.payload).map_err(|e| EncodeError::new(1, e.to_string()))?;
        Ok(())
    }
}

/// Encoder that fails mid-recording with a collaborator error
struct FailingEncoder {
    code: u32,
}

#[async_trait]
impl EncoderSession for FailingEncoder {
    async fn encode(
        &self,
        _device: &GraphicsDevice,
        _target: &CaptureTarget,
        _config: EncoderConfig,
        _output: &Path,
        _cancel: Arc<AtomicBool>,
    ) -> Result<(), EncodeError> {
        Err(EncodeError::new(self.code, "device lost"))
    }
}

struct StubDestination {
    destination: Option<PathBuf>,
}

#[async_trait]
impl DestinationPicker for StubDestination {
    async fn pick_save_location(&self, _request: &SaveRequest) -> Option<PathBuf> {
        self.destination.clone()
    }
}

#[derive(Default)]
struct RecordingLauncher {
    opened: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl FileLauncher for RecordingLauncher {
    async fn launch(&self, path: &Path) -> anyhow::Result<()> {
        self.opened.lock().push(path.to_path_buf());
        Ok(())
    }
}

struct Harness {
    controller: Arc<RecorderController>,
    scratch: tempfile::TempDir,
    launcher: Arc<RecordingLauncher>,
}

fn harness(
    picker: StubPicker,
    encoder: Arc<dyn EncoderSession>,
    destination: Option<PathBuf>,
) -> Harness {
    let scratch = tempfile::tempdir().unwrap();
    let launcher = Arc::new(RecordingLauncher::default());
    let controller = Arc::new(RecorderController::new(
        GraphicsDevice::new("test-adapter"),
        TempStore::new(scratch.path()).unwrap(),
        Arc::new(picker),
        encoder,
        Arc::new(StubDestination { destination }),
        launcher.clone(),
    ));
    Harness {
        controller,
        scratch,
        launcher,
    }
}

fn scratch_files(harness: &Harness) -> Vec<PathBuf> {
    std::fs::read_dir(harness.scratch.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<RecorderEvent>) -> Vec<RecorderEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn cancelled_target_selection_creates_nothing() {
    let harness = harness(
        StubPicker::cancelling(),
        Arc::new(InstantEncoder::new(b"unused")),
        None,
    );
    let mut events = harness.controller.subscribe();

    let outcome = harness.controller.record(&Settings::default()).await.unwrap();

    assert_eq!(outcome, RecordingOutcome::NoTarget);
    assert_eq!(harness.controller.state(), RecorderState::Idle);
    assert!(harness.controller.current_job().is_none());
    assert!(scratch_files(&harness).is_empty());

    let events = drain(&mut events);
    assert!(matches!(events[0], RecorderEvent::TargetSelection));
    assert!(matches!(events[1], RecorderEvent::SelectionCancelled));
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn saved_recording_lands_at_destination_and_opens() {
    let out_dir = tempfile::tempdir().unwrap();
    let destination = out_dir.path().join("clip.mp4");
    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Main", 2560, 1440)),
        Arc::new(InstantEncoder::new(b"mp4 bytes")),
        Some(destination.clone()),
    );
    let mut events = harness.controller.subscribe();

    let outcome = harness.controller.record(&Settings::default()).await.unwrap();

    assert_eq!(
        outcome,
        RecordingOutcome::Saved {
            path: destination.clone()
        }
    );
    assert_eq!(std::fs::read(&destination).unwrap(), b"mp4 bytes");
    // the scratch file moved out, nothing is left behind
    assert!(scratch_files(&harness).is_empty());
    assert_eq!(harness.launcher.opened.lock().as_slice(), &[destination]);
    assert_eq!(harness.controller.state(), RecorderState::Idle);

    let events = drain(&mut events);
    assert!(matches!(events[0], RecorderEvent::TargetSelection));
    assert!(matches!(events[1], RecorderEvent::Started));
    assert!(matches!(events[2], RecorderEvent::Finalizing));
    assert!(matches!(events[3], RecorderEvent::Saved { .. }));
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn saving_replaces_an_existing_file() {
    let out_dir = tempfile::tempdir().unwrap();
    let destination = out_dir.path().join("clip.mp4");
    std::fs::write(&destination, b"old take").unwrap();

    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Main", 1920, 1080)),
        Arc::new(InstantEncoder::new(b"new take")),
        Some(destination.clone()),
    );

    harness.controller.record(&Settings::default()).await.unwrap();
    assert_eq!(std::fs::read(&destination).unwrap(), b"new take");
}

#[tokio::test]
async fn discarded_recording_removes_scratch_file() {
    let harness = harness(
        StubPicker::choosing(CaptureTarget::window("Editor", 1280, 720)),
        Arc::new(InstantEncoder::new(b"mp4 bytes")),
        None,
    );
    let mut events = harness.controller.subscribe();

    let outcome = harness.controller.record(&Settings::default()).await.unwrap();

    assert_eq!(outcome, RecordingOutcome::Discarded);
    assert!(scratch_files(&harness).is_empty());
    assert!(harness.launcher.opened.lock().is_empty());
    assert_eq!(harness.controller.state(), RecorderState::Idle);

    let events = drain(&mut events);
    assert!(matches!(events.last(), Some(RecorderEvent::Discarded)));
}

#[tokio::test]
async fn encoder_failure_surfaces_code_and_keeps_scratch_file() {
    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Main", 1920, 1080)),
        Arc::new(FailingEncoder { code: 0x8876_086C }),
        None,
    );
    let mut events = harness.controller.subscribe();

    let error = harness
        .controller
        .record(&Settings::default())
        .await
        .unwrap_err();

    match error {
        RecorderError::Encode(e) => {
            assert_eq!(e.code, 0x8876_086C);
            assert_eq!(e.message, "device lost");
        }
        other => panic!("expected encode error, got {other:?}"),
    }

    // partial recording is deliberately left for manual recovery
    assert_eq!(scratch_files(&harness).len(), 1);
    assert_eq!(harness.controller.state(), RecorderState::Idle);
    assert!(harness.controller.current_job().is_none());

    let events = drain(&mut events);
    match events.last() {
        Some(RecorderEvent::Failed(response)) => {
            assert_eq!(response.code, 0x8876_086C);
            assert_eq!(response.message, "device lost");
        }
        other => panic!("expected failed event, got {other:?}"),
    }
}

#[tokio::test]
async fn recording_cannot_be_rearmed_while_in_flight() {
    let out_dir = tempfile::tempdir().unwrap();
    let destination = out_dir.path().join("clip.mp4");
    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Main", 1920, 1080)),
        Arc::new(RunUntilStoppedEncoder { payload: b"frames" }),
        Some(destination.clone()),
    );

    let controller = harness.controller.clone();
    let running = tokio::spawn(async move { controller.record(&Settings::default()).await });

    // wait for the encode to actually start
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while harness.controller.state() != RecorderState::Encoding {
        assert!(tokio::time::Instant::now() < deadline, "encode never started");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(harness.controller.current_job().is_some());
    assert!(matches!(
        harness.controller.record(&Settings::default()).await,
        Err(RecorderError::AlreadyRecording)
    ));

    harness.controller.stop().unwrap();
    let outcome = running.await.unwrap().unwrap();
    assert_eq!(outcome, RecordingOutcome::Saved { path: destination });

    // once idle again, stopping is an error
    assert!(matches!(
        harness.controller.stop(),
        Err(RecorderError::NotRecording)
    ));
}

#[tokio::test]
async fn stop_without_a_recording_is_rejected() {
    let harness = harness(
        StubPicker::cancelling(),
        Arc::new(InstantEncoder::new(b"unused")),
        None,
    );
    assert!(matches!(
        harness.controller.stop(),
        Err(RecorderError::NotRecording)
    ));
}

#[tokio::test]
async fn unsupported_capture_is_rejected_up_front() {
    let harness = harness(
        StubPicker {
            target: None,
            supported: false,
        },
        Arc::new(InstantEncoder::new(b"unused")),
        None,
    );
    let mut events = harness.controller.subscribe();

    assert!(matches!(
        harness.controller.record(&Settings::default()).await,
        Err(RecorderError::CaptureUnsupported)
    ));
    assert_eq!(harness.controller.state(), RecorderState::Idle);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn preset_dimensions_win_when_source_size_is_off() {
    let encoder = Arc::new(InstantEncoder::new(b"mp4 bytes"));
    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Odd", 1921, 1081)),
        encoder.clone(),
        None,
    );

    let settings = Settings {
        quality: VideoQuality::Hd720p,
        frame_rate: 30,
        use_source_size: false,
    };
    harness.controller.record(&settings).await.unwrap();

    let seen = encoder.seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!((seen[0].width, seen[0].height), (1280, 720));
    assert_eq!(seen[0].bitrate, VideoQuality::Hd720p.bitrate());
    assert_eq!(seen[0].frame_rate, 30);
}

#[tokio::test]
async fn source_size_rounds_odd_dimensions_down() {
    let encoder = Arc::new(InstantEncoder::new(b"mp4 bytes"));
    let harness = harness(
        StubPicker::choosing(CaptureTarget::display("Odd", 1921, 1081)),
        encoder.clone(),
        None,
    );

    let settings = Settings {
        quality: VideoQuality::Hd720p,
        frame_rate: 30,
        use_source_size: true,
    };
    harness.controller.record(&settings).await.unwrap();

    let seen = encoder.seen.lock();
    assert_eq!((seen[0].width, seen[0].height), (1920, 1080));
    // the tier's bitrate still applies when only the size is derived
    assert_eq!(seen[0].bitrate, VideoQuality::Hd720p.bitrate());
}
