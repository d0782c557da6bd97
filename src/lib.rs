// SPDX-License-Identifier: MPL-2.0

//! Snap Gallery - photo capture, filters and gallery
//!
//! This library holds the capture workflow of the Snap Gallery app: a camera
//! session state machine that stages, filters and commits photos into a
//! shared photo store read by the gallery.
//!
//! # Architecture
//!
//! - [`app`]: capture session, gallery, user profile
//! - [`backends`]: camera collaborator trait and a file-backed camera
//! - [`pipelines`]: image transform trait and the `image`-based filters
//! - [`storage`]: the committed photo store, scratch and library folders
//! - [`config`]: user configuration
//!
//! # Example
//!
//! ```ignore
//! let store = PhotoStore::new();
//! let session = CaptureSession::new(camera, transform, store.clone());
//! session.request_permission().await?;
//! session.capture().await?;
//! session.select_filter(FilterKind::Sepia).await?;
//! session.commit()?;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{
    CaptureSession, FilterKind, FilterOutcome, Gallery, SessionPhase, SessionSnapshot, UserProfile,
};
pub use backends::camera::{Facing, PermissionState, Photo};
pub use config::Config;
pub use errors::{AppError, SessionError};
pub use storage::{PhotoLibrary, PhotoStore, ScratchDir};
