//! Settings persistence
//!
//! A key-value backend port plus the store that maps it to [`Settings`].
//! Loading never fails: each field falls back to its default when the
//! stored entry is missing or unparseable. Saving writes all fields
//! unconditionally; persistence errors are logged, never surfaced.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Settings, FRAME_RATES};
use crate::encoder::VideoQuality;

const KEY_QUALITY: &str = "quality";
const KEY_FRAME_RATE: &str = "frameRate";
const KEY_USE_SOURCE_SIZE: &str = "useSourceSize";

/// Port to an application-local key-value area
pub trait SettingsBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

/// Volatile backend for hosts without persistence and for tests
#[derive(Default)]
pub struct MemoryBackend {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.write().insert(key.to_string(), value);
    }
}

/// JSON file backend
///
/// The whole key-value area lives in one small JSON object; it is read
/// once at open and rewritten on every set.
pub struct JsonFileBackend {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonFileBackend {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Failed to read settings from {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn read_values(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_values(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value);
        if let Err(e) = self.write_values(&values) {
            tracing::warn!("Failed to persist settings to {:?}: {}", self.path, e);
        }
    }
}

/// Store mapping the backend's string entries to [`Settings`]
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Read settings, substituting defaults field by field
    pub fn load(&self) -> Settings {
        let defaults = Settings::default();

        let quality = self
            .backend
            .get(KEY_QUALITY)
            .and_then(|v| v.parse::<VideoQuality>().ok())
            .unwrap_or(defaults.quality);

        let frame_rate = self
            .backend
            .get(KEY_FRAME_RATE)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|rate| FRAME_RATES.contains(rate))
            .unwrap_or(defaults.frame_rate);

        let use_source_size = self
            .backend
            .get(KEY_USE_SOURCE_SIZE)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.use_source_size);

        Settings {
            quality,
            frame_rate,
            use_source_size,
        }
    }

    /// Write all three fields unconditionally
    pub fn save(&self, settings: &Settings) {
        self.backend
            .set(KEY_QUALITY, settings.quality.as_str().to_string());
        self.backend
            .set(KEY_FRAME_RATE, settings.frame_rate.to_string());
        self.backend
            .set(KEY_USE_SOURCE_SIZE, settings.use_source_size.to_string());
    }
}
