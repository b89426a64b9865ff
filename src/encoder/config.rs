//! Encoder configuration
//!
//! Quality presets and the parameter bundle handed to the encoder
//! collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named encoding quality tiers
///
/// Each tier bundles a default output size and bitrate, used unless the
/// user asked for the capture source's own size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "HD1080p")]
    Hd1080p,
    #[serde(rename = "HD720p")]
    Hd720p,
    #[serde(rename = "Uhd2160p")]
    Uhd2160p,
    #[serde(rename = "Uhd4320p")]
    Uhd4320p,
}

impl VideoQuality {
    /// All selectable tiers, in menu order
    pub const ALL: [VideoQuality; 4] = [
        VideoQuality::Hd1080p,
        VideoQuality::Hd720p,
        VideoQuality::Uhd2160p,
        VideoQuality::Uhd4320p,
    ];

    /// Default output dimensions for this tier
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            VideoQuality::Hd720p => (1280, 720),
            VideoQuality::Hd1080p => (1920, 1080),
            VideoQuality::Uhd2160p => (3840, 2160),
            VideoQuality::Uhd4320p => (7680, 4320),
        }
    }

    /// Target bitrate for this tier, in bits per second
    pub fn bitrate(&self) -> u32 {
        match self {
            VideoQuality::Hd720p => 5_000_000,
            VideoQuality::Hd1080p => 8_000_000,
            VideoQuality::Uhd2160p => 35_000_000,
            VideoQuality::Uhd4320p => 100_000_000,
        }
    }

    /// Stable label used for persistence and display
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoQuality::Hd1080p => "HD1080p",
            VideoQuality::Hd720p => "HD720p",
            VideoQuality::Uhd2160p => "Uhd2160p",
            VideoQuality::Uhd4320p => "Uhd4320p",
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoQuality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoQuality::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or(())
    }
}

/// Round a dimension down to the nearest even value
///
/// Hardware encoders reject odd frame dimensions; an odd source
/// dimension loses its last pixel row or column.
pub fn ensure_even(dimension: u32) -> u32 {
    dimension & !1
}

/// Parameter bundle for one encode session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub width: u32,
    pub height: u32,
    pub bitrate: u32,
    pub frame_rate: u32,
}

impl EncoderConfig {
    /// Build a config from a quality tier and frame rate
    pub fn for_quality(quality: VideoQuality, frame_rate: u32) -> Self {
        let (width, height) = quality.dimensions();
        Self {
            width,
            height,
            bitrate: quality.bitrate(),
            frame_rate,
        }
    }

    /// Replace the output size with the capture source's size
    ///
    /// Keeps the tier's bitrate; each dimension is forced even.
    pub fn with_source_size(mut self, width: u32, height: u32) -> Self {
        self.width = ensure_even(width);
        self.height = ensure_even(height);
        self
    }
}
