// SPDX-License-Identifier: MPL-2.0

//! CPU filter implementation backing [`ImageFilterTransform`]
//!
//! Steps, all inside one blocking task:
//! - decode the source photo
//! - scale down to the requested width
//! - per-pixel colour transform for the filter
//! - JPEG encode into the output folder

use super::encoding::{output_path, save_jpeg};
use super::{ImageTransform, TransformRequest};
use crate::app::FilterKind;
use crate::backends::camera::{BackendError, BackendResult, Photo};
use async_trait::async_trait;
use image::imageops::FilterType as ResizeFilter;
use image::{DynamicImage, RgbImage};
use std::path::PathBuf;
use tracing::{debug, info};

/// Filter transform backed by the `image` crate
#[derive(Debug, Clone)]
pub struct ImageFilterTransform {
    output_dir: PathBuf,
}

impl ImageFilterTransform {
    /// Filtered photos are written to `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Run the full transform synchronously
    fn run(
        source: PathBuf,
        output: PathBuf,
        request: TransformRequest,
    ) -> BackendResult<(u32, u32)> {
        let image = image::open(&source)?;
        let image = resize_to_width(image, request.resize_width);

        let mut rgb = image.to_rgb8();
        apply_filter(&mut rgb, request.filter);

        save_jpeg(&rgb, &output, request.jpeg_quality)?;
        Ok(rgb.dimensions())
    }
}

#[async_trait]
impl ImageTransform for ImageFilterTransform {
    async fn transform(&self, photo: &Photo, request: &TransformRequest) -> BackendResult<Photo> {
        let source = photo
            .local_path()
            .ok_or_else(|| BackendError::NotLocal(photo.uri().to_string()))?;
        let output = output_path(&self.output_dir, request.filter.id());
        let request = *request;

        info!(filter = request.filter.id(), source = %source.display(), "Applying filter");

        let target = output.clone();
        let (width, height) =
            tokio::task::spawn_blocking(move || Self::run(source, target, request))
                .await?
                .map_err(|e| BackendError::TransformFailed(e.to_string()))?;

        debug!(width, height, output = %output.display(), "Filter applied");
        Ok(Photo::from_path(output))
    }
}

/// Scale down so the width is at most `max_width`, keeping aspect ratio
fn resize_to_width(image: DynamicImage, max_width: Option<u32>) -> DynamicImage {
    let Some(max_width) = max_width.filter(|w| *w > 0) else {
        return image;
    };
    if image.width() <= max_width {
        return image;
    }

    let height = (image.height() as u64 * max_width as u64 / image.width() as u64).max(1) as u32;
    image.resize_exact(max_width, height, ResizeFilter::Triangle)
}

/// Apply a filter to every pixel of an RGB image
pub fn apply_filter(image: &mut RgbImage, filter: FilterKind) {
    if filter == FilterKind::Original {
        return;
    }

    for pixel in image.pixels_mut() {
        let mut r = pixel[0] as f32 / 255.0;
        let mut g = pixel[1] as f32 / 255.0;
        let mut b = pixel[2] as f32 / 255.0;

        apply_filter_rgb(&mut r, &mut g, &mut b, filter);

        pixel[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Apply filter effect to normalized RGB values in-place
#[inline]
fn apply_filter_rgb(r: &mut f32, g: &mut f32, b: &mut f32, filter: FilterKind) {
    match filter {
        FilterKind::Original => {}

        FilterKind::Monochrome => {
            let gray = luminance(*r, *g, *b);
            *r = gray;
            *g = gray;
            *b = gray;
        }

        FilterKind::Sepia => {
            let lum = luminance(*r, *g, *b);
            *r = (lum * 1.2 + 0.1).clamp(0.0, 1.0);
            *g = (lum * 0.9 + 0.05).clamp(0.0, 1.0);
            *b = (lum * 0.7).clamp(0.0, 1.0);
        }

        FilterKind::Vintage => {
            // Lifted blacks, muted colours, slight warm cast
            *r = *r * 0.85 + 0.1;
            *g = *g * 0.85 + 0.1;
            *b = *b * 0.85 + 0.1;
            let lum = luminance(*r, *g, *b);
            *r = (lum + (*r - lum) * 0.7) * 1.05;
            *g = lum + (*g - lum) * 0.7;
            *b = (lum + (*b - lum) * 0.7) * 0.9;
        }

        FilterKind::Cool => {
            *r *= 0.9;
            *g *= 0.95;
            *b *= 1.1;
        }

        FilterKind::Warm => {
            *r *= 1.1;
            *b *= 0.85;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        RgbImage::from_fn(8, 4, |x, y| Rgb([(x * 30) as u8, (y * 60) as u8, 200]))
    }

    #[test]
    fn test_monochrome_equal_channels() {
        let mut image = sample();
        apply_filter(&mut image, FilterKind::Monochrome);
        for pixel in image.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_original_is_identity() {
        let mut image = sample();
        apply_filter(&mut image, FilterKind::Original);
        assert_eq!(image, sample());
    }

    #[test]
    fn test_warm_and_cool_shift_blue() {
        let mut warm = RgbImage::from_pixel(1, 1, Rgb([100, 100, 100]));
        let mut cool = warm.clone();
        apply_filter(&mut warm, FilterKind::Warm);
        apply_filter(&mut cool, FilterKind::Cool);

        assert!(warm.get_pixel(0, 0)[2] < 100);
        assert!(warm.get_pixel(0, 0)[0] > 100);
        assert!(cool.get_pixel(0, 0)[2] > 100);
    }

    #[test]
    fn test_resize_keeps_aspect_and_never_upscales() {
        let wide = DynamicImage::new_rgb8(2000, 1000);
        let resized = resize_to_width(wide, Some(1000));
        assert_eq!((resized.width(), resized.height()), (1000, 500));

        let small = DynamicImage::new_rgb8(300, 200);
        let untouched = resize_to_width(small, Some(1000));
        assert_eq!((untouched.width(), untouched.height()), (300, 200));
    }

    #[tokio::test]
    async fn test_transform_writes_new_photo() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        RgbImage::from_pixel(40, 20, Rgb([120, 80, 40]))
            .save(&source)
            .unwrap();

        let transform = ImageFilterTransform::new(dir.path().join("filtered"));
        let request = TransformRequest {
            filter: FilterKind::Sepia,
            resize_width: Some(20),
            jpeg_quality: 90,
        };

        let result = transform
            .transform(&Photo::from_path(&source), &request)
            .await
            .unwrap();

        assert_ne!(result, Photo::from_path(&source));
        let decoded = image::open(result.local_path().unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[tokio::test]
    async fn test_transform_rejects_remote_photo() {
        let transform = ImageFilterTransform::new("/tmp");
        let request = TransformRequest {
            filter: FilterKind::Cool,
            resize_width: None,
            jpeg_quality: 90,
        };

        let err = transform
            .transform(&Photo::new("https://example.com/a.png"), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotLocal(_)));
    }

    #[tokio::test]
    async fn test_transform_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let transform = ImageFilterTransform::new(dir.path());
        let request = TransformRequest {
            filter: FilterKind::Monochrome,
            resize_width: None,
            jpeg_quality: 90,
        };

        let err = transform
            .transform(&Photo::from_path(dir.path().join("missing.jpg")), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::TransformFailed(_)));
    }
}
