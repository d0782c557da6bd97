// SPDX-License-Identifier: MPL-2.0

//! Collaborator layer for camera access
//!
//! - [`camera`]: camera trait, shared photo types, and a file-backed camera
//!
//! Image transforms live in [`crate::pipelines::photo`].

pub mod camera;
