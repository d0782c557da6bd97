// SPDX-License-Identifier: MPL-2.0

//! Camera collaborator abstraction
//!
//! The capture session talks to camera hardware only through the
//! [`CameraBackend`] trait.
//!
//! ```text
//! ┌─────────────────────┐
//! │   CaptureSession    │  ← state machine, owns no hardware
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← access + still capture
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │  FileSource  │  ← reference implementation
//!     └──────────────┘
//! ```

pub mod file_source;
pub mod types;

pub use file_source::FileSourceCamera;
pub use types::*;

use async_trait::async_trait;

/// Camera hardware collaborator
///
/// Implementations own the platform camera. Both calls may suspend on a
/// platform callback; neither is expected to time out on its own.
#[async_trait]
pub trait CameraBackend: Send + Sync {
    /// Ask the platform for camera access
    async fn request_access(&self) -> AccessDecision;

    /// Capture a single still frame with the given camera
    ///
    /// # Returns
    /// * `Ok(Photo)` - Reference to the captured image
    /// * `Err(BackendError)` - Hardware or storage failure
    async fn capture_still(&self, facing: Facing) -> BackendResult<Photo>;
}
