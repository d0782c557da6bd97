// SPDX-License-Identifier: GPL-3.0-only

//! File-backed camera
//!
//! Stands in for camera hardware: every still capture re-reads a source
//! image and writes a fresh JPEG into the output folder, so each capture
//! yields a distinct photo reference. Front-camera captures are mirrored
//! horizontally, like a selfie preview.

use super::{AccessDecision, BackendError, BackendResult, CameraBackend, Facing, Photo};
use crate::constants::file_formats;
use crate::constants::transform::CAPTURE_JPEG_QUALITY;
use crate::pipelines::photo::encoding::{output_path, save_jpeg};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Camera that captures from an image file on disk
#[derive(Debug, Clone)]
pub struct FileSourceCamera {
    source: PathBuf,
    output_dir: PathBuf,
    grant_access: bool,
}

impl FileSourceCamera {
    /// Create a camera reading `source` and saving captures to `output_dir`
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> BackendResult<Self> {
        let source = source.into();
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        if !file_formats::is_image_extension(extension) {
            return Err(BackendError::Other(format!(
                "Unsupported file format: {}",
                source.display()
            )));
        }

        Ok(Self {
            source,
            output_dir: output_dir.into(),
            grant_access: true,
        })
    }

    /// Simulate the platform granting or denying camera access
    pub fn with_access(mut self, granted: bool) -> Self {
        self.grant_access = granted;
        self
    }

    fn capture_blocking(source: PathBuf, output: PathBuf, facing: Facing) -> BackendResult<()> {
        let image = image::open(&source).map_err(|e| {
            BackendError::CaptureFailed(format!("{}: {}", source.display(), e))
        })?;

        let image = match facing {
            Facing::Front => image.fliph(),
            Facing::Back => image,
        };

        save_jpeg(&image.to_rgb8(), &output, CAPTURE_JPEG_QUALITY)
    }
}

#[async_trait]
impl CameraBackend for FileSourceCamera {
    async fn request_access(&self) -> AccessDecision {
        if self.grant_access {
            AccessDecision::Granted
        } else {
            warn!("Camera access denied");
            AccessDecision::Denied
        }
    }

    async fn capture_still(&self, facing: Facing) -> BackendResult<Photo> {
        if !self.grant_access {
            return Err(BackendError::AccessDenied);
        }

        let output = output_path(&self.output_dir, "photo");
        info!(source = %self.source.display(), %facing, "Capturing still from file");

        let source = self.source.clone();
        let target = output.clone();
        tokio::task::spawn_blocking(move || Self::capture_blocking(source, target, facing))
            .await??;

        debug!(output = %output.display(), "Still captured");
        Ok(Photo::from_path(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    fn write_source(dir: &Path) -> PathBuf {
        let path = dir.join("scene.png");
        RgbImage::from_fn(16, 8, |x, _| if x < 8 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 0]) })
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_rejects_non_image_source() {
        let err = FileSourceCamera::new("clip.mp4", "/tmp").unwrap_err();
        assert!(matches!(err, BackendError::Other(_)));
    }

    #[tokio::test]
    async fn test_each_capture_is_a_new_photo() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileSourceCamera::new(write_source(dir.path()), dir.path()).unwrap();

        let first = camera.capture_still(Facing::Back).await.unwrap();
        let second = camera.capture_still(Facing::Back).await.unwrap();

        assert_ne!(first, second);
        assert!(first.local_path().unwrap().exists());
    }

    #[tokio::test]
    async fn test_front_capture_is_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileSourceCamera::new(write_source(dir.path()), dir.path()).unwrap();

        let photo = camera.capture_still(Facing::Front).await.unwrap();
        let image = image::open(photo.local_path().unwrap()).unwrap().to_rgb8();

        // Red half moved from the left to the right
        assert!(image.get_pixel(15, 4)[0] > 200);
        assert!(image.get_pixel(0, 4)[0] < 60);
    }

    #[tokio::test]
    async fn test_denied_access() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileSourceCamera::new(write_source(dir.path()), dir.path())
            .unwrap()
            .with_access(false);

        assert_eq!(camera.request_access().await, AccessDecision::Denied);
        assert_eq!(
            camera.capture_still(Facing::Back).await.unwrap_err(),
            BackendError::AccessDenied
        );
    }

    #[tokio::test]
    async fn test_missing_source_fails_capture() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileSourceCamera::new(dir.path().join("gone.jpg"), dir.path()).unwrap();

        let err = camera.capture_still(Facing::Back).await.unwrap_err();
        assert!(matches!(err, BackendError::CaptureFailed(_)));
    }
}
