// SPDX-License-Identifier: GPL-3.0-only

//! Application core
//!
//! - [`session`]: camera screen state machine
//! - [`gallery`]: default + captured photo listing
//! - [`profile`]: user email
//! - [`state`]: filter, phase and snapshot types read by the rendering layer

pub mod gallery;
pub mod profile;
pub mod session;
pub mod state;

pub use gallery::{Gallery, GalleryEntry, PhotoOrigin};
pub use profile::{UserProfile, is_valid_email};
pub use session::{CaptureSession, SessionOptions};
pub use state::{FilterKind, FilterOutcome, ParseFilterError, SessionPhase, SessionSnapshot};
