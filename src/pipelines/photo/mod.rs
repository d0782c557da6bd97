// SPDX-License-Identifier: MPL-2.0

//! Photo filter pipeline
//!
//! Filters are requested from an [`ImageTransform`] collaborator keyed by
//! [`FilterKind`]. The capture session only knows the request/response
//! contract:
//!
//! ```text
//! staged Photo + TransformRequest → ImageTransform → filtered Photo
//! ```
//!
//! [`ImageFilterTransform`] is the bundled implementation: decode, resize,
//! colour transform, JPEG encode, all off the async executor.

pub mod encoding;
pub mod processing;

pub use processing::ImageFilterTransform;

use crate::app::FilterKind;
use crate::backends::camera::{BackendResult, Photo};
use crate::config::TransformSettings;
use async_trait::async_trait;

/// Parameters sent with every transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest {
    /// Filter to apply
    pub filter: FilterKind,
    /// Scale down to this width (aspect preserved, never upscales)
    pub resize_width: Option<u32>,
    /// JPEG quality of the result (1-100)
    pub jpeg_quality: u8,
}

impl TransformRequest {
    /// Build the request for `filter` using the configured output settings
    pub fn for_filter(filter: FilterKind, settings: &TransformSettings) -> Self {
        Self {
            filter,
            resize_width: settings.resize_width,
            jpeg_quality: settings.jpeg_quality,
        }
    }
}

/// Image-transform collaborator
///
/// Produces a new photo reference; the source is never modified in place.
#[async_trait]
pub trait ImageTransform: Send + Sync {
    async fn transform(&self, photo: &Photo, request: &TransformRequest) -> BackendResult<Photo>;
}
