//! Output file handling
//!
//! Scratch files for in-progress encodes, finalization to the user's
//! chosen destination, and the save-location and file-launch ports.

use async_trait::async_trait;
use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};

/// Scratch area for in-progress recordings
///
/// Encodes write to a freshly created, uniquely named file here until
/// the user decides where the result should live.
#[derive(Debug, Clone)]
pub struct TempStore {
    dir: PathBuf,
}

impl TempStore {
    /// Use an explicit scratch directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Scratch area under the OS temp directory
    pub fn system_default() -> io::Result<Self> {
        Self::new(std::env::temp_dir().join("snapcap"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create an empty scratch file with a timestamp-derived unique name
    pub fn create_output(&self) -> io::Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d-%H%M-%S");
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-", stamp))
            .suffix(".mp4")
            .tempfile_in(&self.dir)?;
        // Detach from the guard so the file survives this call.
        let (_, path) = file.keep().map_err(|e| e.error)?;
        tracing::debug!("Created scratch file {:?}", path);
        Ok(path)
    }
}

/// Move a finished recording to its destination, replacing any existing
/// file there
///
/// Rename when possible; scratch and destination may sit on different
/// filesystems, in which case the content is copied and the scratch file
/// removed.
pub fn persist(temp: &Path, destination: &Path) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match std::fs::rename(temp, destination) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(temp, destination)?;
            std::fs::remove_file(temp)
        }
    }
}

/// Delete a scratch file the user decided not to keep
pub fn discard(temp: &Path) -> io::Result<()> {
    std::fs::remove_file(temp)
}

/// What to suggest in the save dialog
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub suggested_name: String,
    pub extension: String,
    pub type_filter: String,
}

impl Default for SaveRequest {
    fn default() -> Self {
        Self {
            suggested_name: "recorded-video".to_string(),
            extension: ".mp4".to_string(),
            type_filter: "MP4 Video".to_string(),
        }
    }
}

/// Port to the save-location dialog
///
/// `None` means the user cancelled the save; that is a decision, not an
/// error.
#[async_trait]
pub trait DestinationPicker: Send + Sync {
    async fn pick_save_location(&self, request: &SaveRequest) -> Option<PathBuf>;
}

/// Port for opening a saved file with the platform's default handler
#[async_trait]
pub trait FileLauncher: Send + Sync {
    async fn launch(&self, path: &Path) -> anyhow::Result<()>;
}

/// Launcher that spawns the platform opener
pub struct SystemLauncher;

#[async_trait]
impl FileLauncher for SystemLauncher {
    async fn launch(&self, path: &Path) -> anyhow::Result<()> {
        use std::process::Command;

        #[cfg(target_os = "windows")]
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;

        #[cfg(target_os = "macos")]
        Command::new("open").arg(path).spawn()?;

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        Command::new("xdg-open").arg(path).spawn()?;

        Ok(())
    }
}
