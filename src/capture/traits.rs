//! Capture type and port definitions
//!
//! Platform-agnostic descriptions of capturable screen regions and the
//! picker seam a host wires to its compositor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of capturable screen region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Display,
    Window,
}

/// A user-selected capture source
///
/// Returned by the picker; immutable once acquired. The reported size is
/// the source's pixel size at selection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureTarget {
    /// What kind of region this is
    pub kind: TargetKind,

    /// Human-readable name (window title or display name)
    pub name: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl CaptureTarget {
    pub fn display(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            kind: TargetKind::Display,
            name: name.into(),
            width,
            height,
        }
    }

    pub fn window(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            kind: TargetKind::Window,
            name: name.into(),
            width,
            height,
        }
    }
}

/// Opaque handle to the graphics device frames are produced on
///
/// The encoder collaborator owns the actual device; this handle only
/// identifies it across calls.
#[derive(Debug, Clone)]
pub struct GraphicsDevice {
    id: Uuid,
    adapter: String,
}

impl GraphicsDevice {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            adapter: adapter.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn adapter(&self) -> &str {
        &self.adapter
    }
}

/// Port to the system capture picker
///
/// The host presents its compositor's picker UI and resolves with the
/// chosen target, or `None` if the user backed out. Cancellation is not
/// an error.
#[async_trait]
pub trait CaptureTargetPicker: Send + Sync {
    /// Whether screen capture is available at all on this device
    fn is_supported(&self) -> bool {
        true
    }

    /// Present the picker and wait for the user's choice
    async fn pick(&self) -> Option<CaptureTarget>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_constructors_report_size() {
        let target = CaptureTarget::window("editor", 1921, 1081);
        assert_eq!(target.kind, TargetKind::Window);
        assert_eq!((target.width, target.height), (1921, 1081));
    }

    #[test]
    fn device_handles_are_distinct() {
        let a = GraphicsDevice::new("default");
        let b = GraphicsDevice::new("default");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.adapter(), "default");
    }
}
