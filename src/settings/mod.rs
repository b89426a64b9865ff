//! User settings
//!
//! The three scalar recording preferences and their persistence seam.

pub mod store;

use serde::{Deserialize, Serialize};

use crate::encoder::VideoQuality;

pub use store::{JsonFileBackend, MemoryBackend, SettingsBackend, SettingsStore};

/// Frame rates the UI offers
pub const FRAME_RATES: [u32; 2] = [30, 60];

/// Recording preferences
///
/// Every field always holds a valid value; loading substitutes defaults
/// for anything absent or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Encoding quality tier
    pub quality: VideoQuality,

    /// Frames per second, one of [`FRAME_RATES`]
    pub frame_rate: u32,

    /// Derive output dimensions from the capture source instead of the tier
    pub use_source_size: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: VideoQuality::Hd1080p,
            frame_rate: 60,
            use_source_size: true,
        }
    }
}
