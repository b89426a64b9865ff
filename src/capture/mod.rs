//! Capture sources
//!
//! Types describing capturable screen regions and the picker port the
//! host implements against its compositor.

pub mod traits;

pub use traits::{CaptureTarget, CaptureTargetPicker, GraphicsDevice, TargetKind};
