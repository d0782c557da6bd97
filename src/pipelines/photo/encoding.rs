// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding and output naming for photos
//!
//! Encoding is CPU-bound; callers run these helpers inside
//! `tokio::task::spawn_blocking`.

use crate::backends::camera::BackendResult;
use chrono::Local;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Build a unique output path like `photo_20240101_120000_1a2b3c4d.jpg`
///
/// The uuid suffix keeps paths unique when several photos land in the same
/// second (burst captures, rapid filter switching).
pub fn output_path(output_dir: &Path, prefix: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let id = Uuid::new_v4().simple().to_string();
    output_dir.join(format!("{}_{}_{}.jpg", prefix, timestamp, &id[..8]))
}

/// Encode an image as JPEG and write it to `path`
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> BackendResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    image.write_with_encoder(encoder)?;

    debug!(path = %path.display(), quality, "Photo encoded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_is_unique_jpg() {
        let dir = Path::new("/tmp/out");
        let a = output_path(dir, "photo");
        let b = output_path(dir, "photo");
        assert_ne!(a, b);
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("jpg"));
        assert!(a.starts_with(dir));
    }

    #[test]
    fn test_save_jpeg_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("a.jpg");
        let image = RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));

        save_jpeg(&image, &path, 90).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 4);
    }
}
